use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{PRIV_BILLBOARD_CREATE, PRIV_BILLBOARD_MANAGE};

/// The acting principal of a request, built from a verified bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Account name (`act`) of the user
    pub act: String,
    /// Display name
    pub name: String,
    pub privileges: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if the user holds a named privilege
    pub fn is_granted(&self, privilege: &str) -> bool {
        self.privileges.iter().any(|p| p == privilege)
    }

    /// Check if user may manage categories and moderate every entry
    pub fn can_manage_billboard(&self) -> bool {
        self.is_granted(PRIV_BILLBOARD_MANAGE)
    }

    /// Check if user may post new entries
    pub fn can_create_entries(&self) -> bool {
        self.can_manage_billboard() || self.is_granted(PRIV_BILLBOARD_CREATE)
    }

    /// Authors may edit their own rows; managers may edit all of them
    pub fn can_modify(&self, author: Option<&str>) -> bool {
        self.can_manage_billboard() || author == Some(self.act.as_str())
    }
}
