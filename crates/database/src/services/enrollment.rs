use crate::{
    entities::{batches, enrollments, users},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    TryIntoModel,
};
use std::collections::HashMap;

/// Default value of `role_in_batch`
pub const DEFAULT_ROLE_IN_BATCH: &str = "student";

/// A user together with every batch membership they hold
pub type StudentRecord = (users::Model, Vec<enrollments::Model>);

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct EnrollmentChanges {
    pub is_active: Option<bool>,
    pub role_in_batch: Option<String>,
}

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn enroll(
        db: &DatabaseConnection,
        user_id: i32,
        batch_id: i32,
        role_in_batch: Option<String>,
    ) -> ServiceResult<enrollments::Model> {
        let txn = db.begin().await?;

        if users::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }
        if batches::Entity::find_by_id(batch_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("Batch"));
        }

        // The unique index on (batch_id, student_id) catches concurrent inserts
        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::BatchId.eq(batch_id))
            .filter(enrollments::Column::StudentId.eq(user_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "User already enrolled in this batch".to_string(),
            ));
        }

        let enrollment = enrollments::ActiveModel {
            batch_id: Set(batch_id),
            student_id: Set(user_id),
            joined_at: Set(Utc::now().into()),
            is_active: Set(true),
            role_in_batch: Set(role_in_batch.unwrap_or_else(|| DEFAULT_ROLE_IN_BATCH.to_string())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!("Enrolled user {user_id} into batch {batch_id}");
        Ok(enrollment)
    }

    pub async fn get_student(db: &DatabaseConnection, user_id: i32) -> ServiceResult<StudentRecord> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let enrollments = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(user_id))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?;

        Ok((user, enrollments))
    }

    /// Every user holding at least one enrollment, by ascending user id
    pub async fn list_students(db: &DatabaseConnection) -> ServiceResult<Vec<StudentRecord>> {
        let student_ids: Vec<i32> = enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::StudentId)
            .distinct()
            .order_by_asc(enrollments::Column::StudentId)
            .into_tuple()
            .all(db)
            .await?;

        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        // Batch fetch users and enrollments, then group
        let users = users::Entity::find()
            .filter(users::Column::Id.is_in(student_ids.clone()))
            .all(db)
            .await?;
        let enrollments = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.is_in(student_ids.clone()))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?;

        let mut users_by_id: HashMap<i32, users::Model> =
            users.into_iter().map(|u| (u.id, u)).collect();
        let mut enrollments_by_student: HashMap<i32, Vec<enrollments::Model>> = HashMap::new();
        for enrollment in enrollments {
            enrollments_by_student
                .entry(enrollment.student_id)
                .or_default()
                .push(enrollment);
        }

        Ok(student_ids
            .into_iter()
            .filter_map(|id| {
                let user = users_by_id.remove(&id)?;
                let enrollments = enrollments_by_student.remove(&id).unwrap_or_default();
                Some((user, enrollments))
            })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> ServiceResult<enrollments::Model> {
        enrollments::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Enrollment"))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        changes: EnrollmentChanges,
    ) -> ServiceResult<enrollments::Model> {
        let enrollment = Self::get(db, id).await?;

        let mut active: enrollments::ActiveModel = enrollment.into();
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(role_in_batch) = changes.role_in_batch {
            active.role_in_batch = Set(role_in_batch);
        }

        if !active.is_changed() {
            return Ok(active.try_into_model()?);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let enrollment = Self::get(db, id).await?;
        enrollment.delete(db).await?;
        Ok(())
    }

    /// Whether the user holds an active enrollment in the batch
    pub async fn is_active_member<C: ConnectionTrait>(
        db: &C,
        batch_id: i32,
        user_id: i32,
    ) -> ServiceResult<bool> {
        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::BatchId.eq(batch_id))
            .filter(enrollments::Column::StudentId.eq(user_id))
            .filter(enrollments::Column::IsActive.eq(true))
            .one(db)
            .await?;

        Ok(enrollment.is_some())
    }

    /// Active enrollments of a batch, in enrollment order
    pub async fn active_in_batch<C: ConnectionTrait>(
        db: &C,
        batch_id: i32,
    ) -> ServiceResult<Vec<enrollments::Model>> {
        Ok(enrollments::Entity::find()
            .filter(enrollments::Column::BatchId.eq(batch_id))
            .filter(enrollments::Column::IsActive.eq(true))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::batch::{BatchService, NewBatch},
        test_support::{insert_user, setup_db},
    };
    use models::role::Role;

    async fn batch(db: &DatabaseConnection, name: &str) -> batches::Model {
        BatchService::create(
            db,
            NewBatch {
                name: name.to_string(),
                description: None,
                coordinator_id: None,
                start_date: None,
                end_date: None,
                is_active: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_enroll_twice_conflicts() {
        let db = setup_db().await;
        let batch = batch(&db, "G10-A").await;
        let student = insert_user(&db, "ravi", Role::Student).await;

        let enrollment = EnrollmentService::enroll(&db, student.id, batch.id, None)
            .await
            .unwrap();
        assert_eq!(enrollment.batch_id, batch.id);
        assert_eq!(enrollment.student_id, student.id);
        assert_eq!(enrollment.role_in_batch, "student");
        assert!(enrollment.is_active);

        let again = EnrollmentService::enroll(&db, student.id, batch.id, None).await;
        assert!(matches!(again, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_enroll_requires_user_and_batch() {
        let db = setup_db().await;
        let batch = batch(&db, "G10-A").await;
        let student = insert_user(&db, "ravi", Role::Student).await;

        let no_user = EnrollmentService::enroll(&db, 999, batch.id, None).await;
        assert!(matches!(no_user, Err(ServiceError::NotFound(m)) if m == "User not found"));

        let no_batch = EnrollmentService::enroll(&db, student.id, 999, None).await;
        assert!(matches!(no_batch, Err(ServiceError::NotFound(m)) if m == "Batch not found"));
    }

    #[tokio::test]
    async fn test_unique_index_backs_duplicate_check() {
        let db = setup_db().await;
        let batch = batch(&db, "G10-A").await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        EnrollmentService::enroll(&db, student.id, batch.id, None)
            .await
            .unwrap();

        // Bypass the pre-check, as a concurrent request would
        let duplicate = enrollments::ActiveModel {
            batch_id: Set(batch.id),
            student_id: Set(student.id),
            joined_at: Set(Utc::now().into()),
            is_active: Set(true),
            role_in_batch: Set("student".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .map_err(ServiceError::from);
        assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_student_view_aggregates_enrollments() {
        let db = setup_db().await;
        let a = batch(&db, "A").await;
        let b = batch(&db, "B").await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        EnrollmentService::enroll(&db, student.id, a.id, None)
            .await
            .unwrap();
        EnrollmentService::enroll(&db, student.id, b.id, Some("monitor".to_string()))
            .await
            .unwrap();

        let (user, enrollments) = EnrollmentService::get_student(&db, student.id)
            .await
            .unwrap();
        assert_eq!(user.id, student.id);
        assert_eq!(enrollments.len(), 2);
        assert_eq!(enrollments[1].role_in_batch, "monitor");

        let missing = EnrollmentService::get_student(&db, 999).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_students_is_distinct_and_ascending() {
        let db = setup_db().await;
        let a = batch(&db, "A").await;
        let b = batch(&db, "B").await;
        let first = insert_user(&db, "first", Role::Student).await;
        let second = insert_user(&db, "second", Role::Student).await;
        let _unenrolled = insert_user(&db, "third", Role::Student).await;

        EnrollmentService::enroll(&db, second.id, a.id, None)
            .await
            .unwrap();
        EnrollmentService::enroll(&db, first.id, b.id, None)
            .await
            .unwrap();
        EnrollmentService::enroll(&db, second.id, b.id, None)
            .await
            .unwrap();

        let students = EnrollmentService::list_students(&db).await.unwrap();
        let ids: Vec<i32> = students.iter().map(|(u, _)| u.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(students[0].1.len(), 1);
        assert_eq!(students[1].1.len(), 2);
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let db = setup_db().await;
        let batch = batch(&db, "G10-A").await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        let enrollment = EnrollmentService::enroll(&db, student.id, batch.id, Some("lead".to_string()))
            .await
            .unwrap();

        let updated = EnrollmentService::update(
            &db,
            enrollment.id,
            EnrollmentChanges {
                is_active: Some(false),
                role_in_batch: None,
            },
        )
        .await
        .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.role_in_batch, "lead");
        assert!(!EnrollmentService::is_active_member(&db, batch.id, student.id)
            .await
            .unwrap());

        EnrollmentService::delete(&db, enrollment.id).await.unwrap();
        let gone = EnrollmentService::get(&db, enrollment.id).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_update_is_a_no_op() {
        let db = setup_db().await;
        let batch = batch(&db, "G10-A").await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        let enrollment = EnrollmentService::enroll(&db, student.id, batch.id, None)
            .await
            .unwrap();

        let unchanged = EnrollmentService::update(&db, enrollment.id, EnrollmentChanges::default())
            .await
            .unwrap();
        assert_eq!(unchanged, enrollment);
    }
}
