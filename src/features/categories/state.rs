use std::sync::Arc;

use axum::extract::FromRef;

use crate::features::categories::admin::CategoryAdmin;
use crate::features::categories::services::CategoryService;

/// Router state of the category admin
#[derive(Clone, FromRef)]
pub struct CategoryState {
    pub service: Arc<CategoryService>,
    pub admin: Arc<CategoryAdmin>,
}
