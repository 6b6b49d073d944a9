use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor that runs the DTO's declared constraints.
///
/// Nothing downstream of a handler ever sees a body that failed validation,
/// so services can persist without re-checking field constraints.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;

        value.validate()?;

        Ok(Self(value))
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
        JsonRejection::MissingJsonContentType(err) => {
            format!("Missing JSON content type: {}", err)
        }
        _ => "Failed to parse JSON body".to_string(),
    };

    AppError::BadRequest(message)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
