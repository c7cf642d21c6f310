use chrono::{DateTime, FixedOffset};
use database::{
    entities::timetable_slots,
    services::timetable::{NewSlot, SlotChanges, SlotFilter},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotResponse {
    pub id: i32,
    pub teacher_id: i32,
    pub class_id: i32,
    pub subject_id: i32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<timetable_slots::Model> for SlotResponse {
    fn from(slot: timetable_slots::Model) -> Self {
        Self {
            id: slot.id,
            teacher_id: slot.teacher_id,
            class_id: slot.class_id,
            subject_id: slot.subject_id,
            day: slot.day,
            start_time: slot.start_time,
            end_time: slot.end_time,
            created_at: slot.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSlotRequest {
    pub teacher_id: i32,
    /// Batch the slot is taught to
    pub class_id: i32,
    pub subject_id: i32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<CreateSlotRequest> for NewSlot {
    fn from(req: CreateSlotRequest) -> Self {
        Self {
            teacher_id: req.teacher_id,
            class_id: req.class_id,
            subject_id: req.subject_id,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSlotRequest {
    pub teacher_id: Option<i32>,
    pub class_id: Option<i32>,
    pub subject_id: Option<i32>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<UpdateSlotRequest> for SlotChanges {
    fn from(req: UpdateSlotRequest) -> Self {
        Self {
            teacher_id: req.teacher_id,
            class_id: req.class_id,
            subject_id: req.subject_id,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotQueryParams {
    pub teacher_id: Option<i32>,
    pub class_id: Option<i32>,
}

impl From<SlotQueryParams> for SlotFilter {
    fn from(params: SlotQueryParams) -> Self {
        Self {
            teacher_id: params.teacher_id,
            class_id: params.class_id,
        }
    }
}
