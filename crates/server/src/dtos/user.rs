use chrono::{DateTime, FixedOffset};
use database::entities::users;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public view of an account; the identity-provider id and `agename` stay hidden
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub role: String,
    pub auth_provider: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_verified: user.is_verified,
            role: user.role.to_string(),
            auth_provider: user.auth_provider.map(|provider| provider.to_string()),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: Option<String>,
    pub agename: Option<String>,
    /// `password` or `google`
    pub provider: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleUpdateRequest {
    /// One of `ADMIN`, `COORDINATOR`, `TEACHER`, `STUDENT`
    pub role: String,
}
