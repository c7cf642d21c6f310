use crate::{
    auth::CurrentUser,
    dtos::timetable::{CreateSlotRequest, SlotQueryParams, SlotResponse, UpdateSlotRequest},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use database::{access::require_roles, services::timetable::TimetableService};
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timetable", get(list_slots).post(create_slot))
        .route(
            "/timetable/{id}",
            get(get_slot).put(update_slot).delete(delete_slot),
        )
}

#[utoipa::path(
    post,
    path = "/timetable",
    request_body = CreateSlotRequest,
    responses(
        (status = 201, description = "Slot created", body = SlotResponse),
        (status = 403, description = "Caller may not edit the timetable"),
        (status = 404, description = "Teacher or batch not found")
    ),
    security(("jwt" = [])),
    tag = "Timetable"
)]
pub async fn create_slot(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<CreateSlotRequest>,
) -> ApiResult<(StatusCode, Json<SlotResponse>)> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    let slot = TimetableService::create(&state.db, req.into()).await?;
    Ok((StatusCode::CREATED, Json(slot.into())))
}

#[utoipa::path(
    get,
    path = "/timetable",
    params(SlotQueryParams),
    responses(
        (status = 200, description = "Matching slots ordered by id", body = Vec<SlotResponse>)
    ),
    security(("jwt" = [])),
    tag = "Timetable"
)]
pub async fn list_slots(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Query(params): Query<SlotQueryParams>,
) -> ApiResult<Json<Vec<SlotResponse>>> {
    let slots = TimetableService::list(&state.db, params.into()).await?;
    Ok(Json(slots.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/timetable/{id}",
    params(("id" = i32, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot found", body = SlotResponse),
        (status = 404, description = "Timetable slot not found")
    ),
    security(("jwt" = [])),
    tag = "Timetable"
)]
pub async fn get_slot(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<SlotResponse>> {
    let slot = TimetableService::get(&state.db, id).await?;
    Ok(Json(slot.into()))
}

#[utoipa::path(
    put,
    path = "/timetable/{id}",
    params(("id" = i32, Path, description = "Slot ID")),
    request_body = UpdateSlotRequest,
    responses(
        (status = 200, description = "Slot updated", body = SlotResponse),
        (status = 403, description = "Caller may not edit the timetable"),
        (status = 404, description = "Slot, teacher or batch not found")
    ),
    security(("jwt" = [])),
    tag = "Timetable"
)]
pub async fn update_slot(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateSlotRequest>,
) -> ApiResult<Json<SlotResponse>> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    let slot = TimetableService::update(&state.db, id, req.into()).await?;
    Ok(Json(slot.into()))
}

#[utoipa::path(
    delete,
    path = "/timetable/{id}",
    params(("id" = i32, Path, description = "Slot ID")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 403, description = "Caller may not edit the timetable"),
        (status = 404, description = "Timetable slot not found")
    ),
    security(("jwt" = [])),
    tag = "Timetable"
)]
pub async fn delete_slot(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    TimetableService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
