use crate::{
    entities::{batches, teachers, timetable_slots},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, TryIntoModel,
};

#[derive(Debug, Clone)]
pub struct NewSlot {
    pub teacher_id: i32,
    pub class_id: i32,
    pub subject_id: i32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct SlotChanges {
    pub teacher_id: Option<i32>,
    pub class_id: Option<i32>,
    pub subject_id: Option<i32>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SlotFilter {
    pub teacher_id: Option<i32>,
    pub class_id: Option<i32>,
}

pub struct TimetableService;

impl TimetableService {
    pub async fn create(
        db: &DatabaseConnection,
        slot: NewSlot,
    ) -> ServiceResult<timetable_slots::Model> {
        Self::ensure_teacher(db, slot.teacher_id).await?;
        Self::ensure_class(db, slot.class_id).await?;

        let row = timetable_slots::ActiveModel {
            teacher_id: Set(slot.teacher_id),
            class_id: Set(slot.class_id),
            subject_id: Set(slot.subject_id),
            day: Set(slot.day),
            start_time: Set(slot.start_time),
            end_time: Set(slot.end_time),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        Ok(row.insert(db).await?)
    }

    pub async fn list(
        db: &DatabaseConnection,
        filter: SlotFilter,
    ) -> ServiceResult<Vec<timetable_slots::Model>> {
        let mut condition = Condition::all();
        if let Some(teacher_id) = filter.teacher_id {
            condition = condition.add(timetable_slots::Column::TeacherId.eq(teacher_id));
        }
        if let Some(class_id) = filter.class_id {
            condition = condition.add(timetable_slots::Column::ClassId.eq(class_id));
        }

        Ok(timetable_slots::Entity::find()
            .filter(condition)
            .order_by_asc(timetable_slots::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> ServiceResult<timetable_slots::Model> {
        timetable_slots::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Timetable slot"))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: SlotChanges,
    ) -> ServiceResult<timetable_slots::Model> {
        let slot = Self::get(db, id).await?;

        let mut active: timetable_slots::ActiveModel = slot.into();
        if let Some(teacher_id) = changes.teacher_id {
            Self::ensure_teacher(db, teacher_id).await?;
            active.teacher_id = Set(teacher_id);
        }
        if let Some(class_id) = changes.class_id {
            Self::ensure_class(db, class_id).await?;
            active.class_id = Set(class_id);
        }
        if let Some(subject_id) = changes.subject_id {
            active.subject_id = Set(subject_id);
        }
        if let Some(day) = changes.day {
            active.day = Set(day);
        }
        if let Some(start_time) = changes.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = changes.end_time {
            active.end_time = Set(end_time);
        }

        if !active.is_changed() {
            return Ok(active.try_into_model()?);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let slot = Self::get(db, id).await?;
        slot.delete(db).await?;
        Ok(())
    }

    async fn ensure_teacher(db: &DatabaseConnection, teacher_id: i32) -> ServiceResult<()> {
        match teachers::Entity::find_by_id(teacher_id).one(db).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Teacher")),
        }
    }

    async fn ensure_class(db: &DatabaseConnection, class_id: i32) -> ServiceResult<()> {
        match batches::Entity::find_by_id(class_id).one(db).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Batch")),
        }
    }
}
