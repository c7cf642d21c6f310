use crate::{
    auth::CurrentUser,
    dtos::{
        comment::{CommentResponse, CommentTextRequest},
        content::{ContentQueryParams, ContentResponse, UploadContentRequest},
    },
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use database::{
    access::require_roles,
    services::{comment::CommentService, content::ContentService},
};
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contents", get(list_contents).post(upload_content))
        .route("/contents/{id}", get(get_content).delete(delete_content))
        .route(
            "/contents/{id}/comments",
            get(list_comments).post(add_comment),
        )
        .route("/contents/comments/{id}", delete(delete_comment))
}

/// Registers an uploaded file; the caller becomes its owner
#[utoipa::path(
    post,
    path = "/contents",
    request_body = UploadContentRequest,
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Unknown content type"),
        (status = 403, description = "Caller may not upload"),
        (status = 404, description = "Batch not found")
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn upload_content(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<UploadContentRequest>,
) -> ApiResult<(StatusCode, Json<ContentResponse>)> {
    require_roles(&caller, &[Role::Admin, Role::Teacher])?;

    let content = ContentService::upload(&state.db, &caller, req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(content.into())))
}

/// Newest first
#[utoipa::path(
    get,
    path = "/contents",
    params(ContentQueryParams),
    responses(
        (status = 200, description = "Matching contents", body = Vec<ContentResponse>)
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn list_contents(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Query(params): Query<ContentQueryParams>,
) -> ApiResult<Json<Vec<ContentResponse>>> {
    let contents = ContentService::list(&state.db, params.into()).await?;
    Ok(Json(contents.into_iter().map(Into::into).collect()))
}

/// Batch-scoped content needs an active enrollment in the batch, or admin
#[utoipa::path(
    get,
    path = "/contents/{id}",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content found", body = ContentResponse),
        (status = 403, description = "Not enrolled in this batch"),
        (status = 404, description = "Content not found")
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn get_content(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<ContentResponse>> {
    let content = ContentService::get_for(&state.db, &caller, id).await?;
    Ok(Json(content.into()))
}

#[utoipa::path(
    delete,
    path = "/contents/{id}",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 204, description = "Content and its comments deleted"),
        (status = 403, description = "Caller is neither the uploader nor an admin"),
        (status = 404, description = "Content not found")
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn delete_content(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    ContentService::delete(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Public comments, oldest first
#[utoipa::path(
    get,
    path = "/contents/{id}/comments",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Public comments", body = Vec<CommentResponse>),
        (status = 404, description = "Content not found")
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = CommentService::list_public(&state.db, id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/contents/{id}/comments",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = CommentTextRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 403, description = "Not enrolled in this batch"),
        (status = 404, description = "Content not found")
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<CommentTextRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let comment = CommentService::add(&state.db, &caller, id, req.text).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(
    delete,
    path = "/contents/comments/{id}",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Caller is neither the author nor an admin"),
        (status = 404, description = "Comment not found")
    ),
    security(("jwt" = [])),
    tag = "Contents"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    CommentService::delete(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
