use crate::{
    auth::CurrentUser,
    dtos::allotment::{AllotRequest, AllotmentQueryParams, AllotmentResponse},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use database::{access::require_roles, services::allotment::AllotmentService};
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/allotment", get(list_allotments).post(allot_teacher))
        .route("/allotment/{id}", delete(delete_allotment))
}

/// Assigns a teacher to a batch
#[utoipa::path(
    post,
    path = "/allotment",
    request_body = AllotRequest,
    responses(
        (status = 201, description = "Teacher allotted", body = AllotmentResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Batch or teacher not found"),
        (status = 409, description = "Teacher already allotted to this batch")
    ),
    security(("jwt" = [])),
    tag = "Allotment"
)]
pub async fn allot_teacher(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<AllotRequest>,
) -> ApiResult<(StatusCode, Json<AllotmentResponse>)> {
    require_roles(&caller, &[Role::Admin])?;

    let row = AllotmentService::allot(&state.db, req.batch_id, req.teacher_id).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[utoipa::path(
    get,
    path = "/allotment",
    params(AllotmentQueryParams),
    responses(
        (status = 200, description = "Allotments ordered by id", body = Vec<AllotmentResponse>)
    ),
    security(("jwt" = [])),
    tag = "Allotment"
)]
pub async fn list_allotments(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Query(params): Query<AllotmentQueryParams>,
) -> ApiResult<Json<Vec<AllotmentResponse>>> {
    let rows = AllotmentService::list(&state.db, params.batch_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/allotment/{id}",
    params(("id" = i32, Path, description = "Allotment ID")),
    responses(
        (status = 204, description = "Allotment removed"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Allotment not found")
    ),
    security(("jwt" = [])),
    tag = "Allotment"
)]
pub async fn delete_allotment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin])?;

    AllotmentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
