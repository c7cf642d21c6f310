use crate::{
    auth::CurrentUser,
    dtos::comment::{CommentResponse, CreateCommentRequest},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use database::services::comment::CommentService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", post(create_comment))
        .route("/comments/content/{content_id}", get(comments_for_content))
        .route("/comments/{id}", delete(delete_comment))
}

#[utoipa::path(
    post,
    path = "/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentResponse),
        (status = 403, description = "Not enrolled in this batch"),
        (status = 404, description = "Content not found")
    ),
    security(("jwt" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let comment = CommentService::add(&state.db, &caller, req.content_id, req.text).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(
    get,
    path = "/comments/content/{content_id}",
    params(("content_id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Public comments, oldest first", body = Vec<CommentResponse>),
        (status = 404, description = "Content not found")
    ),
    security(("jwt" = [])),
    tag = "Comments"
)]
pub async fn comments_for_content(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(content_id): Path<i32>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = CommentService::list_public(&state.db, content_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Caller is neither the author nor an admin"),
        (status = 404, description = "Comment not found")
    ),
    security(("jwt" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    CommentService::delete(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
