use crate::{
    entities::{batches, schedules, users},
    error::{ServiceError, ServiceResult},
};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub location: Option<String>,
}

pub struct ScheduleService;

impl ScheduleService {
    pub async fn create(
        db: &DatabaseConnection,
        creator: &users::Model,
        batch_id: i32,
        schedule: NewSchedule,
    ) -> ServiceResult<schedules::Model> {
        if batches::Entity::find_by_id(batch_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Batch"));
        }
        if let Some(end_time) = schedule.end_time
            && end_time < schedule.start_time
        {
            return Err(ServiceError::BadRequest(
                "end_time must not precede start_time".to_string(),
            ));
        }

        let row = schedules::ActiveModel {
            batch_id: Set(batch_id),
            created_by: Set(Some(creator.id)),
            title: Set(schedule.title),
            description: Set(schedule.description),
            start_time: Set(schedule.start_time),
            end_time: Set(schedule.end_time),
            location: Set(schedule.location),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        Ok(row.insert(db).await?)
    }

    /// A batch's schedule, earliest first
    pub async fn list_for_batch(
        db: &DatabaseConnection,
        batch_id: i32,
    ) -> ServiceResult<Vec<schedules::Model>> {
        if batches::Entity::find_by_id(batch_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Batch"));
        }

        Ok(schedules::Entity::find()
            .filter(schedules::Column::BatchId.eq(batch_id))
            .order_by_asc(schedules::Column::StartTime)
            .order_by_asc(schedules::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let row = schedules::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Schedule"))?;
        row.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::batch::{BatchService, NewBatch},
        test_support::{insert_user, setup_db},
    };
    use chrono::{Duration, TimeZone};
    use models::role::Role;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2026, 7, 1, hour, 0, 0).unwrap().into()
    }

    fn session(title: &str, start: DateTime<FixedOffset>) -> NewSchedule {
        NewSchedule {
            title: title.to_string(),
            description: None,
            start_time: start,
            end_time: Some(start + Duration::hours(1)),
            location: Some("Room 4".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_list_and_delete() {
        let db = setup_db().await;
        let coordinator = insert_user(&db, "meera", Role::Coordinator).await;
        let batch = BatchService::create(
            &db,
            NewBatch {
                name: "G10-A".to_string(),
                description: None,
                coordinator_id: Some(coordinator.id),
                start_date: None,
                end_date: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

        let late = ScheduleService::create(&db, &coordinator, batch.id, session("Lab", at(14)))
            .await
            .unwrap();
        let early = ScheduleService::create(&db, &coordinator, batch.id, session("Lecture", at(9)))
            .await
            .unwrap();
        assert_eq!(late.created_by, Some(coordinator.id));

        let titles: Vec<String> = ScheduleService::list_for_batch(&db, batch.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Lecture", "Lab"]);

        ScheduleService::delete(&db, early.id).await.unwrap();
        assert_eq!(
            ScheduleService::list_for_batch(&db, batch.id)
                .await
                .unwrap()
                .len(),
            1
        );

        let missing = ScheduleService::list_for_batch(&db, 99).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rejects_inverted_window() {
        let db = setup_db().await;
        let coordinator = insert_user(&db, "meera", Role::Coordinator).await;
        let batch = BatchService::create(
            &db,
            NewBatch {
                name: "G10-A".to_string(),
                description: None,
                coordinator_id: None,
                start_date: None,
                end_date: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

        let inverted = NewSchedule {
            end_time: Some(at(8)),
            ..session("Lecture", at(9))
        };
        let result = ScheduleService::create(&db, &coordinator, batch.id, inverted).await;
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }
}
