pub mod allotment;
pub mod auth;
pub mod batch;
pub mod comment;
pub mod content;
pub mod health;
pub mod notification;
pub mod payment;
pub mod root;
pub mod student;
pub mod teacher;
pub mod timetable;

use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes reachable without a bearer token
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
}

/// Routes that sit behind the OAuth2 layer
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(batch::router())
        .merge(allotment::router())
        .merge(content::router())
        .merge(comment::router())
        .merge(notification::router())
        .merge(student::router())
        .merge(teacher::router())
        .merge(timetable::router())
        .merge(payment::router())
}
