use chrono::{DateTime, FixedOffset, NaiveDateTime};
use database::{
    entities::batches,
    services::batch::{BatchChanges, NewBatch},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub coordinator_id: Option<i32>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub is_active: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<batches::Model> for BatchResponse {
    fn from(batch: batches::Model) -> Self {
        Self {
            id: batch.id,
            name: batch.name,
            description: batch.description,
            coordinator_id: batch.coordinator_id,
            start_date: batch.start_date,
            end_date: batch.end_date,
            is_active: batch.is_active,
            created_at: batch.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBatchRequest {
    pub name: String,
    pub description: Option<String>,
    pub coordinator_id: Option<i32>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
}

impl From<CreateBatchRequest> for NewBatch {
    fn from(req: CreateBatchRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            coordinator_id: req.coordinator_id,
            start_date: req.start_date,
            end_date: req.end_date,
            is_active: req.is_active,
        }
    }
}

/// Omitted fields keep their stored value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub coordinator_id: Option<i32>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
}

impl From<UpdateBatchRequest> for BatchChanges {
    fn from(req: UpdateBatchRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            coordinator_id: req.coordinator_id,
            start_date: req.start_date,
            end_date: req.end_date,
            is_active: req.is_active,
        }
    }
}
