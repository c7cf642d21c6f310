use crate::{
    auth::CurrentUser,
    dtos::{
        batch::{BatchResponse, CreateBatchRequest, UpdateBatchRequest},
        schedule::{CreateScheduleRequest, ScheduleResponse},
    },
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use database::{
    access::require_roles,
    services::{batch::BatchService, schedule::ScheduleService},
};
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/batches", get(list_batches).post(create_batch))
        .route(
            "/batches/{id}",
            get(get_batch).put(update_batch).delete(delete_batch),
        )
        .route(
            "/batches/{id}/schedules",
            get(list_schedules).post(create_schedule),
        )
        .route("/batches/schedules/{id}", delete(delete_schedule))
}

#[utoipa::path(
    post,
    path = "/batches",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Batch created", body = BatchResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Coordinator not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn create_batch(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<CreateBatchRequest>,
) -> ApiResult<(StatusCode, Json<BatchResponse>)> {
    require_roles(&caller, &[Role::Admin])?;

    let batch = BatchService::create(&state.db, req.into()).await?;
    Ok((StatusCode::CREATED, Json(batch.into())))
}

#[utoipa::path(
    get,
    path = "/batches",
    responses(
        (status = 200, description = "All batches ordered by id", body = Vec<BatchResponse>),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn list_batches(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<Vec<BatchResponse>>> {
    require_roles(&caller, &[Role::Admin])?;

    let batches = BatchService::list(&state.db).await?;
    Ok(Json(batches.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/batches/{id}",
    params(("id" = i32, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Batch found", body = BatchResponse),
        (status = 404, description = "Batch not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn get_batch(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<BatchResponse>> {
    let batch = BatchService::get(&state.db, id).await?;
    Ok(Json(batch.into()))
}

/// Overwrites only the fields present in the body
#[utoipa::path(
    put,
    path = "/batches/{id}",
    params(("id" = i32, Path, description = "Batch ID")),
    request_body = UpdateBatchRequest,
    responses(
        (status = 200, description = "Batch updated", body = BatchResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Batch or coordinator not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn update_batch(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBatchRequest>,
) -> ApiResult<Json<BatchResponse>> {
    require_roles(&caller, &[Role::Admin])?;

    let batch = BatchService::update(&state.db, id, req.into()).await?;
    Ok(Json(batch.into()))
}

#[utoipa::path(
    delete,
    path = "/batches/{id}",
    params(("id" = i32, Path, description = "Batch ID")),
    responses(
        (status = 204, description = "Batch deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Batch not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn delete_batch(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin])?;

    BatchService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A batch's sessions, earliest first
#[utoipa::path(
    get,
    path = "/batches/{id}/schedules",
    params(("id" = i32, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Schedule entries", body = Vec<ScheduleResponse>),
        (status = 404, description = "Batch not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<ScheduleResponse>>> {
    let schedules = ScheduleService::list_for_batch(&state.db, id).await?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/batches/{id}/schedules",
    params(("id" = i32, Path, description = "Batch ID")),
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule entry created", body = ScheduleResponse),
        (status = 400, description = "End time precedes start time"),
        (status = 403, description = "Caller may not schedule sessions"),
        (status = 404, description = "Batch not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<CreateScheduleRequest>,
) -> ApiResult<(StatusCode, Json<ScheduleResponse>)> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator, Role::Teacher])?;

    let schedule = ScheduleService::create(&state.db, &caller, id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(schedule.into())))
}

#[utoipa::path(
    delete,
    path = "/batches/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule entry deleted"),
        (status = 403, description = "Caller may not delete schedules"),
        (status = 404, description = "Schedule not found")
    ),
    security(("jwt" = [])),
    tag = "Batches"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    ScheduleService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
