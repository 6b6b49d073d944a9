use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireEntryCreate;
use crate::features::entries::admin::EntryAdmin;
use crate::features::entries::dtos::{
    CreateEntryCommentDto, CreateEntryDto, CreateEntryImageDto, EntryCommentResponseDto,
    EntryImageResponseDto, EntryListQuery, EntryResponseDto, UpdateEntryDto,
};
use crate::features::entries::services::EntryService;
use crate::shared::crud::{AdminSchema, Authorized};
use crate::shared::types::{ApiResponse, Meta};

/// List entries visible to the current user
#[utoipa::path(
    get,
    path = "/api/billboard/entries",
    params(EntryListQuery),
    responses(
        (status = 200, description = "List of entries", body = ApiResponse<Vec<EntryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn list_entries(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Query(query): Query<EntryListQuery>,
) -> Result<Json<ApiResponse<Vec<EntryResponseDto>>>> {
    let (entries, total) = service.list(&query, &auth.user).await?;
    let data = entries
        .into_iter()
        .map(EntryResponseDto::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta::for_page(total, &query.pagination())),
    )))
}

/// Describe the entry admin (fields, routes, breadcrumbs)
#[utoipa::path(
    get,
    path = "/api/billboard/entries/schema",
    responses(
        (status = 200, description = "Admin description", body = ApiResponse<AdminSchema>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn entry_schema(
    auth: Authorized<EntryAdmin>,
    State(admin): State<Arc<EntryAdmin>>,
) -> Result<Json<ApiResponse<AdminSchema>>> {
    let schema = AdminSchema::describe(admin.as_ref(), &auth.user);
    Ok(Json(ApiResponse::success(Some(schema), None, None)))
}

/// Post a new entry
#[utoipa::path(
    post,
    path = "/api/billboard/entry/add",
    request_body = CreateEntryDto,
    responses(
        (status = 201, description = "Entry created", body = ApiResponse<EntryResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - create privilege required")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn create_entry(
    RequireEntryCreate(user): RequireEntryCreate,
    State(service): State<Arc<EntryService>>,
    ValidatedJson(dto): ValidatedJson<CreateEntryDto>,
) -> Result<(StatusCode, Json<ApiResponse<EntryResponseDto>>)> {
    let entry = service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(EntryResponseDto::try_from(entry)?),
            Some("Entry added".to_string()),
            None,
        )),
    ))
}

/// Get an entry with its images and comments
#[utoipa::path(
    get,
    path = "/api/billboard/entry/{id}",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry found", body = ApiResponse<EntryResponseDto>),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn get_entry(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EntryResponseDto>>> {
    let entry = service.get(id, &auth.user).await?;
    Ok(Json(ApiResponse::success(Some(EntryResponseDto::try_from(entry)?), None, None)))
}

/// Edit an entry
#[utoipa::path(
    put,
    path = "/api/billboard/entry/{id}/edit",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = UpdateEntryDto,
    responses(
        (status = 200, description = "Entry updated", body = ApiResponse<EntryResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn update_entry(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateEntryDto>,
) -> Result<Json<ApiResponse<EntryResponseDto>>> {
    let entry = service.update(id, dto, &auth.user).await?;
    Ok(Json(ApiResponse::success(Some(EntryResponseDto::try_from(entry)?), None, None)))
}

/// Delete an entry with its images and comments
#[utoipa::path(
    delete,
    path = "/api/billboard/entry/{id}/delete",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn delete_entry(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &auth.user).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Attach an image to an entry
#[utoipa::path(
    post,
    path = "/api/billboard/entry/{id}/images",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = CreateEntryImageDto,
    responses(
        (status = 201, description = "Image attached", body = ApiResponse<EntryImageResponseDto>),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn add_entry_image(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<CreateEntryImageDto>,
) -> Result<(StatusCode, Json<ApiResponse<EntryImageResponseDto>>)> {
    let image = service.add_image(id, dto, &auth.user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(image.into()), None, None)),
    ))
}

/// Remove an image from an entry
#[utoipa::path(
    delete,
    path = "/api/billboard/entry/{id}/images/{image_id}",
    params(
        ("id" = i32, Path, description = "Entry ID"),
        ("image_id" = i32, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image removed"),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Entry or image not found")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn remove_entry_image(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path((id, image_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove_image(id, image_id, &auth.user).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Comment on an entry
#[utoipa::path(
    post,
    path = "/api/billboard/entry/{id}/comments",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = CreateEntryCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<EntryCommentResponseDto>),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry is closed for comments")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn add_entry_comment(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<CreateEntryCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<EntryCommentResponseDto>>)> {
    let comment = service.add_comment(id, dto, &auth.user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment.into()), None, None)),
    ))
}

/// Delete a comment
#[utoipa::path(
    delete,
    path = "/api/billboard/entry/{id}/comments/{comment_id}",
    params(
        ("id" = i32, Path, description = "Entry ID"),
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Forbidden - not the comment author"),
        (status = 404, description = "Entry or comment not found")
    ),
    tag = "entries",
    security(("bearer_auth" = []))
)]
pub async fn remove_entry_comment(
    auth: Authorized<EntryAdmin>,
    State(service): State<Arc<EntryService>>,
    Path((id, comment_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove_comment(id, comment_id, &auth.user).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
