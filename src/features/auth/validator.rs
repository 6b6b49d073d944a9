use super::model::AuthenticatedUser;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Verifies HS256 bearer tokens issued by the platform
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    /// Account name of the user
    sub: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    privileges: Vec<String>,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.leeway = config.jwt_leeway.as_secs();
        validation.validate_nbf = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("Token has no subject".to_string()));
        }

        Ok(AuthenticatedUser {
            name: claims.name.unwrap_or_else(|| claims.sub.clone()),
            act: claims.sub,
            privileges: claims.privileges,
        })
    }
}
