use database::entities::batch_teachers;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct AllotmentResponse {
    pub id: i32,
    pub batch_id: i32,
    pub teacher_id: i32,
}

impl From<batch_teachers::Model> for AllotmentResponse {
    fn from(row: batch_teachers::Model) -> Self {
        Self {
            id: row.id,
            batch_id: row.batch_id,
            teacher_id: row.teacher_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AllotRequest {
    pub batch_id: i32,
    pub teacher_id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AllotmentQueryParams {
    pub batch_id: Option<i32>,
}
