use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::state::CategoryState;
use crate::shared::crud::{CrudAction, CrudRouting};

/// Create routes for the category admin.
///
/// Paths come from the admin's route naming, so overrides like the
/// `categories` index apply to the router as well.
pub fn routes(state: CategoryState) -> Router {
    let admin = state.admin.clone();
    let index = admin.route_pattern(CrudAction::Index);

    Router::new()
        .route(&index, get(handlers::list_categories))
        .route(&format!("{}/schema", index), get(handlers::category_schema))
        .route(
            &admin.route_pattern(CrudAction::Add),
            post(handlers::create_category),
        )
        .route(
            &admin.route_pattern(CrudAction::Show),
            get(handlers::get_category),
        )
        .route(
            &admin.route_pattern(CrudAction::Edit),
            put(handlers::update_category),
        )
        .route(
            &admin.route_pattern(CrudAction::Delete),
            delete(handlers::delete_category),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::core::config::BillboardConfig;
    use crate::features::categories::admin::CategoryAdmin;
    use crate::features::categories::services::CategoryService;
    use crate::shared::test_helpers::{
        create_manager_user, create_member_user, lazy_pool, with_user, MemoryAuditLog,
    };

    fn state() -> CategoryState {
        let admin = Arc::new(CategoryAdmin::new(
            Arc::new(MemoryAuditLog::default()),
            &BillboardConfig::default(),
        ));
        CategoryState {
            service: Arc::new(CategoryService::new(lazy_pool(), admin.clone())),
            admin,
        }
    }

    #[tokio::test]
    async fn test_requires_authentication() {
        let server = TestServer::new(routes(state())).unwrap();

        let response = server.get("/api/billboard/manage/categories").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_members_are_forbidden() {
        let app = with_user(routes(state()), create_member_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/billboard/manage/category/add")
            .json(&json!({ "title": "", "description": "" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected_before_persisting() {
        let app = with_user(routes(state()), create_manager_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/billboard/manage/category/add")
            .json(&json!({ "title": "   ", "description": "School events" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .put("/api/billboard/manage/category/1/edit")
            .json(&json!({ "title": "Events", "description": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_schema_endpoint() {
        let app = with_user(routes(state()), create_manager_user());
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/billboard/manage/categories/schema").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["id"], "billboard_category");
        assert_eq!(
            body["data"]["routes"][0]["path"],
            "/api/billboard/manage/categories"
        );
        assert_eq!(body["data"]["breadcrumbs"][0]["path"], "/api/billboard/manage");
    }

    #[tokio::test]
    async fn test_default_plural_is_not_routed() {
        let app = with_user(routes(state()), create_manager_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/billboard/manage/categorys/schema")
            .expect_failure()
            .await;
        response.assert_status_not_found();
    }
}
