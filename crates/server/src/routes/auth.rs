use crate::{
    auth::{CurrentUser, VerifiedSubject},
    dtos::{
        parse_enum,
        user::{RegisterRequest, RoleUpdateRequest, UserResponse},
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
use database::{
    access::require_roles,
    services::user::{NewUser, UserService},
};
use log::info;
use models::{auth_provider::AuthProvider, role::Role};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/role", put(set_role))
}

/// Creates the local account for the token's subject
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Unknown provider"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 409, description = "Subject or email already registered")
    ),
    security(("jwt" = [])),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    VerifiedSubject(subject): VerifiedSubject,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let provider = req
        .provider
        .as_deref()
        .map(|name| parse_enum::<AuthProvider>("provider", name))
        .transpose()?;

    let user = UserService::register(
        &state.db,
        &subject,
        NewUser {
            email: req.email,
            full_name: req.full_name,
            agename: req.agename,
            provider,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// The caller's own account
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Caller's account", body = UserResponse),
        (status = 401, description = "Not registered or invalid token")
    ),
    security(("jwt" = [])),
    tag = "Authentication"
)]
pub async fn me(CurrentUser(caller): CurrentUser) -> Json<UserResponse> {
    Json(caller.into())
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get(&state.db, id).await?;
    Ok(Json(user.into()))
}

/// Changes a user's platform role
#[utoipa::path(
    put,
    path = "/users/{id}/role",
    params(("id" = i32, Path, description = "User ID")),
    request_body = RoleUpdateRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 400, description = "Unknown role"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "User not found")
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn set_role(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(req): Json<RoleUpdateRequest>,
) -> ApiResult<Json<UserResponse>> {
    require_roles(&caller, &[Role::Admin])?;
    let role = parse_enum::<Role>("role", &req.role)?;

    let user = UserService::set_role(&state.db, id, role).await?;
    info!("User {} now has role {}", user.id, user.role);

    Ok(Json(user.into()))
}
