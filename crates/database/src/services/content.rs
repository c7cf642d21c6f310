use crate::{
    entities::{batches, contents, users},
    error::{ServiceError, ServiceResult},
    services::enrollment::EnrollmentService,
};
use chrono::Utc;
use models::content_type::ContentType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub storage_url: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub batch_id: Option<i32>,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub batch_id: Option<i32>,
    pub only_public: bool,
}

pub struct ContentService;

impl ContentService {
    pub async fn upload(
        db: &DatabaseConnection,
        uploader: &users::Model,
        new_content: NewContent,
    ) -> ServiceResult<contents::Model> {
        if let Some(batch_id) = new_content.batch_id
            && batches::Entity::find_by_id(batch_id).one(db).await?.is_none()
        {
            return Err(ServiceError::not_found("Batch"));
        }

        let content = contents::ActiveModel {
            title: Set(new_content.title),
            description: Set(new_content.description),
            content_type: Set(new_content.content_type),
            storage_url: Set(new_content.storage_url),
            uploader_id: Set(uploader.id),
            batch_id: Set(new_content.batch_id),
            created_at: Set(Utc::now().into()),
            is_public: Set(new_content.is_public),
            ..Default::default()
        };

        Ok(content.insert(db).await?)
    }

    /// Newest first
    pub async fn list(
        db: &DatabaseConnection,
        filter: ContentFilter,
    ) -> ServiceResult<Vec<contents::Model>> {
        let mut condition = Condition::all();
        if let Some(batch_id) = filter.batch_id {
            condition = condition.add(contents::Column::BatchId.eq(batch_id));
        }
        if filter.only_public {
            condition = condition.add(contents::Column::IsPublic.eq(true));
        }

        Ok(contents::Entity::find()
            .filter(condition)
            .order_by_desc(contents::Column::CreatedAt)
            .order_by_desc(contents::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn find(db: &DatabaseConnection, id: i32) -> ServiceResult<contents::Model> {
        contents::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Content"))
    }

    /// Fetches content the caller is allowed to see
    pub async fn get_for(
        db: &DatabaseConnection,
        caller: &users::Model,
        id: i32,
    ) -> ServiceResult<contents::Model> {
        let content = Self::find(db, id).await?;
        Self::ensure_batch_access(db, caller, &content).await?;
        Ok(content)
    }

    /// Batch-scoped content is visible to admins and active members of the batch
    pub async fn ensure_batch_access(
        db: &DatabaseConnection,
        caller: &users::Model,
        content: &contents::Model,
    ) -> ServiceResult<()> {
        let Some(batch_id) = content.batch_id else {
            return Ok(());
        };
        if caller.role.is_admin()
            || EnrollmentService::is_active_member(db, batch_id, caller.id).await?
        {
            return Ok(());
        }

        Err(ServiceError::Forbidden("Not enrolled in this batch".to_string()))
    }

    pub async fn delete(
        db: &DatabaseConnection,
        caller: &users::Model,
        id: i32,
    ) -> ServiceResult<()> {
        let content = Self::find(db, id).await?;
        if !caller.role.is_admin() && content.uploader_id != caller.id {
            return Err(ServiceError::Forbidden(
                "Not authorized to delete this content".to_string(),
            ));
        }

        content.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{
            batch::{BatchService, NewBatch},
            enrollment::EnrollmentService,
        },
        test_support::{insert_user, setup_db},
    };
    use models::role::Role;

    fn lecture(batch_id: Option<i32>, is_public: bool) -> NewContent {
        NewContent {
            title: "Kinematics".to_string(),
            storage_url: "s3://lectures/kinematics.mp4".to_string(),
            description: None,
            content_type: ContentType::Video,
            batch_id,
            is_public,
        }
    }

    async fn batch(db: &DatabaseConnection) -> batches::Model {
        BatchService::create(
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
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_sets_owner_and_checks_batch() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;

        let content = ContentService::upload(&db, &teacher, lecture(None, false))
            .await
            .unwrap();
        assert_eq!(content.uploader_id, teacher.id);
        assert_eq!(content.content_type, ContentType::Video);
        assert!(!content.is_public);

        let missing_batch = ContentService::upload(&db, &teacher, lecture(Some(77), false)).await;
        assert!(matches!(missing_batch, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_content_visibility() {
        let db = setup_db().await;
        let batch = batch(&db).await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let member = insert_user(&db, "ravi", Role::Student).await;
        let outsider = insert_user(&db, "omar", Role::Student).await;
        EnrollmentService::enroll(&db, member.id, batch.id, None)
            .await
            .unwrap();

        let content = ContentService::upload(&db, &teacher, lecture(Some(batch.id), false))
            .await
            .unwrap();

        let denied = ContentService::get_for(&db, &outsider, content.id).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        let seen = ContentService::get_for(&db, &member, content.id).await.unwrap();
        assert_eq!(seen, content);
        let seen = ContentService::get_for(&db, &admin, content.id).await.unwrap();
        assert_eq!(seen.id, content.id);
    }

    #[tokio::test]
    async fn test_unscoped_content_is_visible_to_everyone() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        let content = ContentService::upload(&db, &teacher, lecture(None, false))
            .await
            .unwrap();

        assert!(ContentService::get_for(&db, &student, content.id).await.is_ok());
        let missing = ContentService::get_for(&db, &student, 999).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let db = setup_db().await;
        let batch = batch(&db).await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;

        let first = ContentService::upload(&db, &teacher, lecture(Some(batch.id), true))
            .await
            .unwrap();
        let second = ContentService::upload(&db, &teacher, lecture(None, true))
            .await
            .unwrap();
        let third = ContentService::upload(&db, &teacher, lecture(Some(batch.id), false))
            .await
            .unwrap();

        let all: Vec<i32> = ContentService::list(&db, ContentFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(all, vec![third.id, second.id, first.id]);

        let public_in_batch: Vec<i32> = ContentService::list(
            &db,
            ContentFilter {
                batch_id: Some(batch.id),
                only_public: true,
            },
        )
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
        assert_eq!(public_in_batch, vec![first.id]);
    }

    #[tokio::test]
    async fn test_delete_requires_uploader_or_admin() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let other = insert_user(&db, "tom", Role::Teacher).await;
        let content = ContentService::upload(&db, &teacher, lecture(None, false))
            .await
            .unwrap();

        let denied = ContentService::delete(&db, &other, content.id).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        ContentService::delete(&db, &teacher, content.id).await.unwrap();
        let gone = ContentService::find(&db, content.id).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
    }
}
