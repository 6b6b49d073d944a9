use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::categories::admin::CategoryAdmin;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::crud::{AdminSchema, Authorized};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List categories
#[utoipa::path(
    get,
    path = "/api/billboard/manage/categories",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - billboard manage privilege required")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn list_categories(
    _auth: Authorized<CategoryAdmin>,
    State(service): State<Arc<CategoryService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (categories, total) = service.list(&pagination).await?;
    let data = categories.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta::for_page(total, &pagination)),
    )))
}

/// Describe the category admin (fields, routes, breadcrumbs)
#[utoipa::path(
    get,
    path = "/api/billboard/manage/categories/schema",
    responses(
        (status = 200, description = "Admin description", body = ApiResponse<AdminSchema>),
        (status = 403, description = "Forbidden - billboard manage privilege required")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn category_schema(
    auth: Authorized<CategoryAdmin>,
    State(admin): State<Arc<CategoryAdmin>>,
) -> Result<Json<ApiResponse<AdminSchema>>> {
    let schema = AdminSchema::describe(admin.as_ref(), &auth.user);
    Ok(Json(ApiResponse::success(Some(schema), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/billboard/manage/category/add",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - billboard manage privilege required")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    auth: Authorized<CategoryAdmin>,
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let category = service.create(dto, &auth.user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category.into()),
            Some("Category added".to_string()),
            None,
        )),
    ))
}

/// Get a category
#[utoipa::path(
    get,
    path = "/api/billboard/manage/category/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn get_category(
    _auth: Authorized<CategoryAdmin>,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Edit a category
#[utoipa::path(
    put,
    path = "/api/billboard/manage/category/{id}/edit",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    auth: Authorized<CategoryAdmin>,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.update(id, dto, &auth.user).await?;
    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/billboard/manage/category/{id}/delete",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has entries")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    auth: Authorized<CategoryAdmin>,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &auth.user).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
