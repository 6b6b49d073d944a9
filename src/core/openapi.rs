use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::entries::{dtos as entries_dtos, handlers as entries_handlers};
use crate::shared::crud::{admin as crud_admin, mapper as crud_mapper, routing as crud_routing};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Categories (manage)
        categories_handlers::list_categories,
        categories_handlers::category_schema,
        categories_handlers::create_category,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Entries
        entries_handlers::list_entries,
        entries_handlers::entry_schema,
        entries_handlers::create_entry,
        entries_handlers::get_entry,
        entries_handlers::update_entry,
        entries_handlers::delete_entry,
        entries_handlers::add_entry_image,
        entries_handlers::remove_entry_image,
        entries_handlers::add_entry_comment,
        entries_handlers::remove_entry_comment,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Admin descriptions
            crud_admin::AdminSchema,
            crud_admin::Breadcrumb,
            crud_mapper::FieldDescriptor,
            crud_mapper::FieldKind,
            crud_mapper::Responsive,
            crud_routing::CrudAction,
            crud_routing::RouteDescriptor,
            ApiResponse<crud_admin::AdminSchema>,
            // Auth
            auth::model::AuthenticatedUser,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Entries
            entries_dtos::CreateEntryDto,
            entries_dtos::UpdateEntryDto,
            entries_dtos::CreateEntryImageDto,
            entries_dtos::CreateEntryCommentDto,
            entries_dtos::EntryResponseDto,
            entries_dtos::EntryImageResponseDto,
            entries_dtos::EntryCommentResponseDto,
            ApiResponse<Vec<entries_dtos::EntryResponseDto>>,
            ApiResponse<entries_dtos::EntryResponseDto>,
            ApiResponse<entries_dtos::EntryImageResponseDto>,
            ApiResponse<entries_dtos::EntryCommentResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current principal"),
        (name = "categories", description = "Bill-Board categories (manage privilege)"),
        (name = "entries", description = "Bill-Board entries, images and comments"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Bill-Board API",
        version = "0.1.0",
        description = "API documentation for the Bill-Board service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_admin_routes() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        assert!(paths.contains_key("/api/billboard/manage/categories"));
        assert!(paths.contains_key("/api/billboard/entries"));
        assert!(paths.contains_key("/api/billboard/entry/{id}/comments/{comment_id}"));
        assert!(!paths.contains_key("/api/billboard/manage/categorys"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Schul-Bill-Board".to_string(),
            version: "1.2.0".to_string(),
            description: "Test".to_string(),
        }
        .modify(&mut openapi);

        assert_eq!(openapi.info.title, "Schul-Bill-Board");
        assert_eq!(openapi.info.version, "1.2.0");
        assert!(openapi
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
