//! Privilege guards for the bill-board routes.
//!
//! Guards extract the authenticated user and verify a privilege before the
//! handler body (or its JSON payload) is looked at. Admin-wide checks go
//! through [`crate::shared::crud::Authorized`] instead.
//!
//! Privileges:
//! - billboard_manage: manage categories, moderate all entries
//! - billboard_create: post entries and edit own entries

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated(parts: &Parts) -> Result<&AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for posting entries ("billboard create" or "billboard manage").
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireEntryCreate(user): RequireEntryCreate) { ... }
/// ```
pub struct RequireEntryCreate(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireEntryCreate
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.can_create_entries() {
            return Err(AppError::Forbidden(
                "Privilege to create Bill-Board entries required".to_string(),
            ));
        }

        Ok(RequireEntryCreate(user.clone()))
    }
}
