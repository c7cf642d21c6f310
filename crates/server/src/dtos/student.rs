use chrono::{DateTime, FixedOffset};
use database::{
    entities::enrollments,
    services::enrollment::{EnrollmentChanges, StudentRecord},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: i32,
    pub batch_id: i32,
    pub student_id: i32,
    pub joined_at: DateTime<FixedOffset>,
    pub is_active: bool,
    pub role_in_batch: String,
}

impl From<enrollments::Model> for EnrollmentResponse {
    fn from(enrollment: enrollments::Model) -> Self {
        Self {
            id: enrollment.id,
            batch_id: enrollment.batch_id,
            student_id: enrollment.student_id,
            joined_at: enrollment.joined_at,
            is_active: enrollment.is_active,
            role_in_batch: enrollment.role_in_batch,
        }
    }
}

/// A user with every batch membership they hold
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub enrollments: Vec<EnrollmentResponse>,
}

impl From<StudentRecord> for StudentResponse {
    fn from((user, enrollments): StudentRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role.to_string(),
            enrollments: enrollments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub batch_id: i32,
    /// Defaults to `student`
    pub role_in_batch: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEnrollmentRequest {
    pub is_active: Option<bool>,
    pub role_in_batch: Option<String>,
}

impl From<UpdateEnrollmentRequest> for EnrollmentChanges {
    fn from(req: UpdateEnrollmentRequest) -> Self {
        Self {
            is_active: req.is_active,
            role_in_batch: req.role_in_batch,
        }
    }
}
