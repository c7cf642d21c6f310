use crate::{
    auth::CurrentUser,
    dtos::student::{EnrollRequest, EnrollmentResponse, StudentResponse, UpdateEnrollmentRequest},
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use database::{access::require_roles, services::enrollment::EnrollmentService};
use models::role::Role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/{user_id}/enroll", post(enroll_student))
        .route("/students/user/{user_id}", get(get_student))
        .route(
            "/students/enrollments/{id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
}

/// Enrolls a user into a batch
#[utoipa::path(
    post,
    path = "/students/{user_id}/enroll",
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 403, description = "Caller may not enroll students"),
        (status = 404, description = "User or batch not found"),
        (status = 409, description = "User already enrolled in this batch")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn enroll_student(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<i32>,
    Json(req): Json<EnrollRequest>,
) -> ApiResult<(StatusCode, Json<EnrollmentResponse>)> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    let enrollment =
        EnrollmentService::enroll(&state.db, user_id, req.batch_id, req.role_in_batch).await?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

#[utoipa::path(
    get,
    path = "/students/user/{user_id}",
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with enrollments", body = StudentResponse),
        (status = 404, description = "User not found")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<StudentResponse>> {
    let record = EnrollmentService::get_student(&state.db, user_id).await?;
    Ok(Json(record.into()))
}

/// Every user holding at least one enrollment, by ascending id
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "Students with enrollments", body = Vec<StudentResponse>)
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
) -> ApiResult<Json<Vec<StudentResponse>>> {
    let records = EnrollmentService::list_students(&state.db).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/students/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment found", body = EnrollmentResponse),
        (status = 404, description = "Enrollment not found")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_enrollment(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<EnrollmentResponse>> {
    let enrollment = EnrollmentService::get(&state.db, id).await?;
    Ok(Json(enrollment.into()))
}

#[utoipa::path(
    put,
    path = "/students/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    request_body = UpdateEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentResponse),
        (status = 403, description = "Caller may not change enrollments"),
        (status = 404, description = "Enrollment not found")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn update_enrollment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEnrollmentRequest>,
) -> ApiResult<Json<EnrollmentResponse>> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    let enrollment = EnrollmentService::update(&state.db, id, req.into()).await?;
    Ok(Json(enrollment.into()))
}

#[utoipa::path(
    delete,
    path = "/students/enrollments/{id}",
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 403, description = "Caller may not change enrollments"),
        (status = 404, description = "Enrollment not found")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    require_roles(&caller, &[Role::Admin, Role::Coordinator])?;

    EnrollmentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_user, test_state};
    use database::{
        error::ServiceError,
        services::batch::{BatchService, NewBatch},
    };

    #[tokio::test]
    async fn test_second_enrollment_conflicts() {
        let state = test_state().await;
        let coordinator = insert_user(&state, "meera", Role::Coordinator).await;
        let student = insert_user(&state, "ravi", Role::Student).await;
        let batch = BatchService::create(
            &state.db,
            NewBatch {
                name: "G10-A".to_string(),
                description: None,
                coordinator_id: Some(coordinator.id),
                start_date: None,
                end_date: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

        let (student_id, batch_id) = (student.id, batch.id);
        let enroll = |caller| {
            enroll_student(
                State(state.clone()),
                CurrentUser(caller),
                Path(student_id),
                Json(EnrollRequest {
                    batch_id,
                    role_in_batch: None,
                }),
            )
        };

        let (status, Json(first)) = enroll(coordinator.clone()).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first.role_in_batch, "student");

        let second = enroll(coordinator).await;
        assert!(matches!(second, Err(err) if matches!(err.0, ServiceError::Conflict(_))));

        let Json(record) = get_student(
            State(state.clone()),
            CurrentUser(student.clone()),
            Path(student_id),
        )
        .await
        .unwrap();
        assert_eq!(record.enrollments.len(), 1);

        let by_student = enroll(student).await;
        assert!(matches!(by_student, Err(err) if matches!(err.0, ServiceError::Forbidden(_))));
    }
}
