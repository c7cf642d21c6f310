use crate::{
    entities::{batches, users},
    error::{ServiceError, ServiceResult},
};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
    TryIntoModel,
};

#[derive(Debug, Clone)]
pub struct NewBatch {
    pub name: String,
    pub description: Option<String>,
    pub coordinator_id: Option<i32>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct BatchChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub coordinator_id: Option<i32>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
}

pub struct BatchService;

impl BatchService {
    pub async fn create(db: &DatabaseConnection, new_batch: NewBatch) -> ServiceResult<batches::Model> {
        if let Some(coordinator_id) = new_batch.coordinator_id {
            Self::ensure_user_exists(db, coordinator_id).await?;
        }

        let batch = batches::ActiveModel {
            name: Set(new_batch.name),
            description: Set(new_batch.description),
            coordinator_id: Set(new_batch.coordinator_id),
            start_date: Set(new_batch.start_date),
            end_date: Set(new_batch.end_date),
            is_active: Set(new_batch.is_active.unwrap_or(true)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        Ok(batch.insert(db).await?)
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<batches::Model>> {
        Ok(batches::Entity::find()
            .order_by_asc(batches::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> ServiceResult<batches::Model> {
        batches::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Batch"))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: BatchChanges,
    ) -> ServiceResult<batches::Model> {
        let batch = Self::get(db, id).await?;
        if let Some(coordinator_id) = changes.coordinator_id {
            Self::ensure_user_exists(db, coordinator_id).await?;
        }

        let mut active: batches::ActiveModel = batch.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(coordinator_id) = changes.coordinator_id {
            active.coordinator_id = Set(Some(coordinator_id));
        }
        if let Some(start_date) = changes.start_date {
            active.start_date = Set(Some(start_date));
        }
        if let Some(end_date) = changes.end_date {
            active.end_date = Set(Some(end_date));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        // Nothing changed; the UPDATE would have no SET clause
        if !active.is_changed() {
            return Ok(active.try_into_model()?);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let batch = Self::get(db, id).await?;
        batch.delete(db).await?;
        Ok(())
    }

    async fn ensure_user_exists(db: &DatabaseConnection, user_id: i32) -> ServiceResult<()> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("Coordinator"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_user, setup_db};
    use chrono::NaiveDate;
    use models::role::Role;

    fn g10a() -> NewBatch {
        NewBatch {
            name: "G10-A".to_string(),
            description: Some("Grade 10, section A".to_string()),
            coordinator_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).and_then(|d| d.and_hms_opt(9, 0, 0)),
            end_date: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input() {
        let db = setup_db().await;

        let created = BatchService::create(&db, g10a()).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = BatchService::get(&db, created.id).await.unwrap();
        assert_eq!(fetched.name, "G10-A");
        assert_eq!(fetched.description.as_deref(), Some("Grade 10, section A"));
        assert_eq!(fetched.start_date, g10a().start_date);
        assert_eq!(fetched.end_date, None);
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_create_with_unknown_coordinator_is_not_found() {
        let db = setup_db().await;
        let result = BatchService::create(
            &db,
            NewBatch {
                coordinator_id: Some(42),
                ..g10a()
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_omitted_fields() {
        let db = setup_db().await;
        let coordinator = insert_user(&db, "meera", Role::Coordinator).await;
        let batch = BatchService::create(&db, g10a()).await.unwrap();

        let updated = BatchService::update(
            &db,
            batch.id,
            BatchChanges {
                coordinator_id: Some(coordinator.id),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "G10-A");
        assert_eq!(updated.description.as_deref(), Some("Grade 10, section A"));
        assert_eq!(updated.coordinator_id, Some(coordinator.id));
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_empty_update_is_a_no_op() {
        let db = setup_db().await;
        let batch = BatchService::create(&db, g10a()).await.unwrap();

        let updated = BatchService::update(&db, batch.id, BatchChanges::default())
            .await
            .unwrap();
        assert_eq!(updated, batch);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let db = setup_db().await;
        let batch = BatchService::create(&db, g10a()).await.unwrap();

        BatchService::delete(&db, batch.id).await.unwrap();

        let result = BatchService::get(&db, batch.id).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        let again = BatchService::delete(&db, batch.id).await;
        assert!(matches!(again, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let db = setup_db().await;
        for name in ["B", "A", "C"] {
            BatchService::create(
                &db,
                NewBatch {
                    name: name.to_string(),
                    ..g10a()
                },
            )
            .await
            .unwrap();
        }

        let names: Vec<_> = BatchService::list(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
