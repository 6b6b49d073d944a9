use std::sync::Arc;

use axum::extract::FromRef;

use crate::features::entries::admin::EntryAdmin;
use crate::features::entries::services::EntryService;

#[derive(Clone, FromRef)]
pub struct EntryState {
    pub service: Arc<EntryService>,
    pub admin: Arc<EntryAdmin>,
}
