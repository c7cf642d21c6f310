use crate::{
    entities::{batch_teachers, batches, teachers},
    error::{ServiceError, ServiceResult},
};
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

pub struct AllotmentService;

impl AllotmentService {
    /// Assigns a teacher to a batch; each pair may exist once
    pub async fn allot(
        db: &DatabaseConnection,
        batch_id: i32,
        teacher_id: i32,
    ) -> ServiceResult<batch_teachers::Model> {
        if batches::Entity::find_by_id(batch_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Batch"));
        }
        if teachers::Entity::find_by_id(teacher_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Teacher"));
        }

        let existing = batch_teachers::Entity::find()
            .filter(batch_teachers::Column::BatchId.eq(batch_id))
            .filter(batch_teachers::Column::TeacherId.eq(teacher_id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Teacher already allotted to this batch".to_string(),
            ));
        }

        let row = batch_teachers::ActiveModel {
            batch_id: Set(batch_id),
            teacher_id: Set(teacher_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Allotted teacher {teacher_id} to batch {batch_id}");
        Ok(row)
    }

    pub async fn list(
        db: &DatabaseConnection,
        batch_id: Option<i32>,
    ) -> ServiceResult<Vec<batch_teachers::Model>> {
        let mut query = batch_teachers::Entity::find();
        if let Some(batch_id) = batch_id {
            query = query.filter(batch_teachers::Column::BatchId.eq(batch_id));
        }

        Ok(query
            .order_by_asc(batch_teachers::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let row = batch_teachers::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Allotment"))?;
        row.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{
            batch::{BatchService, NewBatch},
            teacher::{TeacherProfile, TeacherService},
        },
        test_support::{insert_user, setup_db},
    };
    use models::role::Role;

    async fn fixtures(db: &DatabaseConnection) -> (batches::Model, teachers::Model) {
        let batch = BatchService::create(
            db,
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
        let user = insert_user(db, "tara", Role::Teacher).await;
        let teacher = TeacherService::create(db, user.id, TeacherProfile::default())
            .await
            .unwrap();
        (batch, teacher)
    }

    #[tokio::test]
    async fn test_allot_twice_conflicts() {
        let db = setup_db().await;
        let (batch, teacher) = fixtures(&db).await;

        let row = AllotmentService::allot(&db, batch.id, teacher.id)
            .await
            .unwrap();
        assert_eq!(row.batch_id, batch.id);
        assert_eq!(row.teacher_id, teacher.id);

        let again = AllotmentService::allot(&db, batch.id, teacher.id).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_allot_requires_batch_and_teacher() {
        let db = setup_db().await;
        let (batch, teacher) = fixtures(&db).await;

        let no_batch = AllotmentService::allot(&db, 99, teacher.id).await;
        assert!(matches!(no_batch, Err(ServiceError::NotFound(m)) if m == "Batch not found"));

        let no_teacher = AllotmentService::allot(&db, batch.id, 99).await;
        assert!(matches!(no_teacher, Err(ServiceError::NotFound(m)) if m == "Teacher not found"));
    }

    #[tokio::test]
    async fn test_deleting_teacher_removes_allotments() {
        let db = setup_db().await;
        let (batch, teacher) = fixtures(&db).await;
        AllotmentService::allot(&db, batch.id, teacher.id)
            .await
            .unwrap();

        TeacherService::delete(&db, teacher.id).await.unwrap();
        assert!(AllotmentService::list(&db, Some(batch.id))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_allotment() {
        let db = setup_db().await;
        let (batch, teacher) = fixtures(&db).await;
        let row = AllotmentService::allot(&db, batch.id, teacher.id)
            .await
            .unwrap();

        AllotmentService::delete(&db, row.id).await.unwrap();
        let gone = AllotmentService::delete(&db, row.id).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));

        // The pair can be allotted again once removed
        assert!(AllotmentService::allot(&db, batch.id, teacher.id).await.is_ok());
    }
}
