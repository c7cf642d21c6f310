use crate::{
    auth::CurrentUser,
    dtos::{
        parse_enum,
        payment::{PaymentResponse, PaymentStatusRequest, RecordPaymentRequest},
    },
    error::ApiResult,
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use database::{access::require_roles, services::payment::PaymentService};
use log::info;
use models::{payment_status::PaymentStatus, role::Role};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", post(record_payment))
        .route("/payments/me", get(my_payments))
        .route("/payments/{id}/status", put(update_payment_status))
}

#[utoipa::path(
    post,
    path = "/payments",
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Unknown status or negative amount"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Payer not found")
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<RecordPaymentRequest>,
) -> ApiResult<(StatusCode, Json<PaymentResponse>)> {
    require_roles(&caller, &[Role::Admin])?;

    let payment = PaymentService::record(&state.db, req.try_into()?).await?;
    info!("Recorded payment {} for user {}", payment.id, payment.payer_id);

    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// The caller's payments, newest first
#[utoipa::path(
    get,
    path = "/payments/me",
    responses(
        (status = 200, description = "Caller's payments", body = Vec<PaymentResponse>)
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn my_payments(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let payments = PaymentService::list_for(&state.db, caller.id).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/payments/{id}/status",
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = PaymentStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = PaymentResponse),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Payment not found")
    ),
    security(("jwt" = [])),
    tag = "Payments"
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<PaymentStatusRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    require_roles(&caller, &[Role::Admin])?;
    let status = parse_enum::<PaymentStatus>("status", &req.status)?;

    let payment = PaymentService::update_status(&state.db, id, status).await?;
    Ok(Json(payment.into()))
}
