use crate::{
    auth::CurrentUser,
    dtos::teacher::{TeacherRequest, TeacherResponse},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use database::{access::require_roles, services::teacher::TeacherService};
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(list_teachers))
        .route("/teachers/user/{user_id}", get(get_teacher_by_user))
        .route(
            "/teachers/{id}",
            post(create_teacher)
                .put(update_teacher)
                .delete(delete_teacher),
        )
}

/// Creates the teacher profile of an existing user; the path segment is the user id
#[utoipa::path(
    post,
    path = "/teachers/{id}",
    params(("id" = i32, Path, description = "ID of the user receiving the profile")),
    request_body = TeacherRequest,
    responses(
        (status = 201, description = "Profile created", body = TeacherResponse),
        (status = 400, description = "Subject is empty or contains a comma"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Teacher profile already exists")
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<i32>,
    Json(req): Json<TeacherRequest>,
) -> ApiResult<(StatusCode, Json<TeacherResponse>)> {
    require_roles(&caller, &[Role::Admin])?;

    let teacher = TeacherService::create(&state.db, user_id, req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(teacher.into())))
}

#[utoipa::path(
    get,
    path = "/teachers/user/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile found", body = TeacherResponse),
        (status = 404, description = "Teacher not found")
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn get_teacher_by_user(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<TeacherResponse>> {
    let teacher = TeacherService::get_by_user(&state.db, user_id).await?;
    Ok(Json(teacher.into()))
}

#[utoipa::path(
    get,
    path = "/teachers",
    responses(
        (status = 200, description = "All profiles ordered by id", body = Vec<TeacherResponse>)
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
) -> ApiResult<Json<Vec<TeacherResponse>>> {
    let teachers = TeacherService::list(&state.db).await?;
    Ok(Json(teachers.into_iter().map(Into::into).collect()))
}

/// Replaces subjects, experience and qualifications
#[utoipa::path(
    put,
    path = "/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    request_body = TeacherRequest,
    responses(
        (status = 200, description = "Profile updated", body = TeacherResponse),
        (status = 400, description = "Subject is empty or contains a comma"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Teacher not found")
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<TeacherRequest>,
) -> ApiResult<Json<TeacherResponse>> {
    require_roles(&caller, &[Role::Admin])?;

    let teacher = TeacherService::update(&state.db, id, req.try_into()?).await?;
    Ok(Json(teacher.into()))
}

#[utoipa::path(
    delete,
    path = "/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Teacher not found")
    ),
    security(("jwt" = [])),
    tag = "Teachers"
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin])?;

    TeacherService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
