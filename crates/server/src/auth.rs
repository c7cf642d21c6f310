use crate::{error::ApiError, state::AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use database::{entities::users, error::ServiceError, services::user::UserService};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Subject of the bearer token verified by the OAuth2 layer
pub struct VerifiedSubject(pub String);

impl<S> FromRequestParts<S> for VerifiedSubject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .map(Self)
            .ok_or(ApiError(ServiceError::Unauthenticated))
    }
}

/// Local account of the caller; requests from unregistered subjects are rejected
pub struct CurrentUser(pub users::Model);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let VerifiedSubject(subject) = VerifiedSubject::from_request_parts(parts, state).await?;

        match UserService::find_by_external_id(&state.db, &subject).await? {
            Some(user) if user.is_active => Ok(Self(user)),
            Some(_) => Err(ApiError(ServiceError::Forbidden(
                "Account is deactivated".to_string(),
            ))),
            None => Err(ApiError(ServiceError::Unauthenticated)),
        }
    }
}
