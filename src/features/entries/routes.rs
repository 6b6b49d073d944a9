use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::entries::handlers;
use crate::features::entries::state::EntryState;
use crate::shared::crud::{CrudAction, CrudRouting};

/// Create routes for the entry admin and the entry attachments
pub fn routes(state: EntryState) -> Router {
    let admin = state.admin.clone();
    let index = admin.route_pattern(CrudAction::Index);
    let show = admin.route_pattern(CrudAction::Show);

    Router::new()
        .route(&index, get(handlers::list_entries))
        .route(&format!("{}/schema", index), get(handlers::entry_schema))
        .route(
            &admin.route_pattern(CrudAction::Add),
            post(handlers::create_entry),
        )
        .route(&show, get(handlers::get_entry))
        .route(
            &admin.route_pattern(CrudAction::Edit),
            put(handlers::update_entry),
        )
        .route(
            &admin.route_pattern(CrudAction::Delete),
            delete(handlers::delete_entry),
        )
        .route(
            &format!("{}/images", show),
            post(handlers::add_entry_image),
        )
        .route(
            &format!("{}/images/{{image_id}}", show),
            delete(handlers::remove_entry_image),
        )
        .route(
            &format!("{}/comments", show),
            post(handlers::add_entry_comment),
        )
        .route(
            &format!("{}/comments/{{comment_id}}", show),
            delete(handlers::remove_entry_comment),
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
    use crate::features::categories::{CategoryAdmin, CategoryService};
    use crate::features::entries::{EntryAdmin, EntryService};
    use crate::shared::test_helpers::{
        create_guest_user, create_member_user, lazy_pool, with_user, MemoryAuditLog,
    };

    fn state() -> EntryState {
        let pool = lazy_pool();
        let audit_log = Arc::new(MemoryAuditLog::default());
        let config = BillboardConfig::default();

        let category_admin = Arc::new(CategoryAdmin::new(audit_log.clone(), &config));
        let categories = Arc::new(CategoryService::new(pool.clone(), category_admin));
        let admin = Arc::new(EntryAdmin::new(audit_log, &config));

        EntryState {
            service: Arc::new(EntryService::new(pool, admin.clone(), categories)),
            admin,
        }
    }

    #[tokio::test]
    async fn test_requires_authentication() {
        let server = TestServer::new(routes(state())).unwrap();

        let response = server.get("/api/billboard/entries").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .post("/api/billboard/entry/add")
            .json(&json!({ "title": "Assembly", "description": "Monday 9am", "category_id": 1 }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_posting_requires_create_privilege() {
        let app = with_user(routes(state()), create_guest_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/billboard/entry/add")
            .json(&json!({ "title": "Assembly", "description": "Monday 9am", "category_id": 1 }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_entry_is_rejected_before_persisting() {
        let app = with_user(routes(state()), create_member_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/billboard/entry/add")
            .json(&json!({ "title": " ", "description": "Monday 9am", "category_id": 1 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/billboard/entry/add")
            .json(&json!({ "title": "Assembly", "description": "Monday 9am" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected() {
        let app = with_user(routes(state()), create_guest_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/billboard/entry/1/comments")
            .json(&json!({ "title": "Thanks", "content": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_schema_endpoint() {
        let app = with_user(routes(state()), create_guest_user());
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/billboard/entries/schema").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["id"], "billboard");
        assert_eq!(body["data"]["routes"][0]["path"], "/api/billboard/entries");
        assert_eq!(
            body["data"]["routes"][1]["path"],
            "/api/billboard/entry/add"
        );
        assert_eq!(body["data"]["form_fields"][2]["name"], "category_id");
    }
}
