use crate::{
    entities::{comments, users},
    error::{ServiceError, ServiceResult},
    services::content::ContentService,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

pub struct CommentService;

impl CommentService {
    /// Adds a comment as `author`, applying the same batch gate as reading the content
    pub async fn add(
        db: &DatabaseConnection,
        author: &users::Model,
        content_id: i32,
        text: String,
    ) -> ServiceResult<comments::Model> {
        let content = ContentService::find(db, content_id).await?;
        ContentService::ensure_batch_access(db, author, &content).await?;

        let comment = comments::ActiveModel {
            content_id: Set(content.id),
            author_id: Set(author.id),
            text: Set(text),
            created_at: Set(Utc::now().into()),
            is_public: Set(true),
            ..Default::default()
        };

        Ok(comment.insert(db).await?)
    }

    /// Public comments on a content, oldest first
    pub async fn list_public(
        db: &DatabaseConnection,
        content_id: i32,
    ) -> ServiceResult<Vec<comments::Model>> {
        ContentService::find(db, content_id).await?;

        Ok(comments::Entity::find()
            .filter(comments::Column::ContentId.eq(content_id))
            .filter(comments::Column::IsPublic.eq(true))
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn delete(
        db: &DatabaseConnection,
        caller: &users::Model,
        id: i32,
    ) -> ServiceResult<()> {
        let comment = comments::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment"))?;

        if !caller.role.is_admin() && comment.author_id != caller.id {
            return Err(ServiceError::Forbidden(
                "Not authorized to delete this comment".to_string(),
            ));
        }

        comment.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::contents,
        services::{
            batch::{BatchService, NewBatch},
            content::NewContent,
        },
        test_support::{insert_user, setup_db},
    };
    use models::{content_type::ContentType, role::Role};

    async fn content(
        db: &DatabaseConnection,
        uploader: &users::Model,
        batch_id: Option<i32>,
    ) -> contents::Model {
        ContentService::upload(
            db,
            uploader,
            NewContent {
                title: "Thermodynamics notes".to_string(),
                storage_url: "s3://notes/thermo.pdf".to_string(),
                description: Some("Chapter 4".to_string()),
                content_type: ContentType::Pdf,
                batch_id,
                is_public: true,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_and_list_in_creation_order() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        let content = content(&db, &teacher, None).await;

        let first = CommentService::add(&db, &student, content.id, "First!".to_string())
            .await
            .unwrap();
        let second = CommentService::add(&db, &teacher, content.id, "Welcome".to_string())
            .await
            .unwrap();
        assert_eq!(first.author_id, student.id);
        assert!(first.is_public);

        let listed = CommentService::list_public(&db, content.id).await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_missing_content_is_not_found() {
        let db = setup_db().await;
        let student = insert_user(&db, "ravi", Role::Student).await;

        let add = CommentService::add(&db, &student, 404, "hello".to_string()).await;
        assert!(matches!(add, Err(ServiceError::NotFound(_))));

        let list = CommentService::list_public(&db, 404).await;
        assert!(matches!(list, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_hidden_comments_are_not_listed() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let content = content(&db, &teacher, None).await;
        let comment = CommentService::add(&db, &teacher, content.id, "draft".to_string())
            .await
            .unwrap();

        let mut hidden: comments::ActiveModel = comment.into();
        hidden.is_public = Set(false);
        hidden.update(&db).await.unwrap();

        assert!(CommentService::list_public(&db, content.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_batch_comment_requires_membership() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let outsider = insert_user(&db, "omar", Role::Student).await;
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
        let content = content(&db, &teacher, Some(batch.id)).await;

        let denied = CommentService::add(&db, &outsider, content.id, "hi".to_string()).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_by_author_or_admin_only() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let author = insert_user(&db, "ravi", Role::Student).await;
        let other = insert_user(&db, "omar", Role::Student).await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let content = content(&db, &teacher, None).await;

        let a = CommentService::add(&db, &author, content.id, "a".to_string())
            .await
            .unwrap();
        let b = CommentService::add(&db, &author, content.id, "b".to_string())
            .await
            .unwrap();

        let denied = CommentService::delete(&db, &other, a.id).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        CommentService::delete(&db, &author, a.id).await.unwrap();
        CommentService::delete(&db, &admin, b.id).await.unwrap();

        let gone = CommentService::delete(&db, &admin, a.id).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
    }
}
