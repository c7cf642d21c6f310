use axum::http::StatusCode;

/// Identifies the service; the API reference lives at `/docs`
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Cohort API. See /docs for the reference.")
}
