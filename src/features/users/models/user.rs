use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Platform account, referenced by bill-board rows but owned elsewhere
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Account name, primary key of the platform user table
    pub act: String,
    pub firstname: String,
    pub lastname: String,
    /// Set once the platform has marked the account as deleted
    pub deleted: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("{} {}", self.firstname.trim(), self.lastname.trim());
        let name = name.trim();
        if name.is_empty() {
            f.write_str(&self.act)
        } else {
            f.write_str(name)
        }
    }
}
