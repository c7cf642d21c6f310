use chrono::{DateTime, FixedOffset};
use database::{entities::schedules, services::schedule::NewSchedule};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: i32,
    pub batch_id: i32,
    pub created_by: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub location: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<schedules::Model> for ScheduleResponse {
    fn from(schedule: schedules::Model) -> Self {
        Self {
            id: schedule.id,
            batch_id: schedule.batch_id,
            created_by: schedule.created_by,
            title: schedule.title,
            description: schedule.description,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            location: schedule.location,
            created_at: schedule.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateScheduleRequest {
    pub title: String,
    pub description: Option<String>,
    /// RFC 3339 timestamp with offset
    pub start_time: DateTime<FixedOffset>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub location: Option<String>,
}

impl From<CreateScheduleRequest> for NewSchedule {
    fn from(req: CreateScheduleRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
        }
    }
}
