use crate::{
    auth::CurrentUser,
    dtos::notification::{InboxQueryParams, NotificationResponse, SendNotificationRequest},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use database::{access::require_roles, services::notification::NotificationService};
use log::info;
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications", post(send_notification))
        .route("/notifications/me", get(my_notifications))
        .route("/notifications/{id}/read", put(mark_read))
        .route("/notifications/{id}", delete(delete_notification))
}

/// Sends to one user, or to every active member of a batch
#[utoipa::path(
    post,
    path = "/notifications",
    request_body = SendNotificationRequest,
    responses(
        (status = 201, description = "One notification per recipient", body = Vec<NotificationResponse>),
        (status = 400, description = "Neither recipient_id nor batch_id given"),
        (status = 403, description = "Caller may not send to this audience"),
        (status = 404, description = "Recipient or batch not found")
    ),
    security(("jwt" = [])),
    tag = "Notifications"
)]
pub async fn send_notification(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<SendNotificationRequest>,
) -> ApiResult<(StatusCode, Json<Vec<NotificationResponse>>)> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator, Role::Teacher])?;

    let created = NotificationService::send(&state.db, &caller, req.into()).await?;
    info!("User {} sent {} notification(s)", caller.id, created.len());

    Ok((
        StatusCode::CREATED,
        Json(created.into_iter().map(Into::into).collect()),
    ))
}

/// The caller's inbox, newest first
#[utoipa::path(
    get,
    path = "/notifications/me",
    params(InboxQueryParams),
    responses(
        (status = 200, description = "Caller's notifications", body = Vec<NotificationResponse>)
    ),
    security(("jwt" = [])),
    tag = "Notifications"
)]
pub async fn my_notifications(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(params): Query<InboxQueryParams>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let rows = NotificationService::list_for(&state.db, caller.id, params.limit).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationResponse),
        (status = 403, description = "Caller is neither the recipient nor an admin"),
        (status = 404, description = "Notification not found")
    ),
    security(("jwt" = [])),
    tag = "Notifications"
)]
pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification = NotificationService::mark_read(&state.db, &caller, id).await?;
    Ok(Json(notification.into()))
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Notification not found")
    ),
    security(("jwt" = [])),
    tag = "Notifications"
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin])?;

    NotificationService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
