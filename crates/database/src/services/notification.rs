use crate::{
    entities::{batches, notifications, users},
    error::{ServiceError, ServiceResult},
    services::enrollment::EnrollmentService,
};
use chrono::Utc;
use log::info;
use models::role::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

pub const DEFAULT_CHANNEL: &str = "in-app";
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Message to deliver either to one user or to every active member of a batch
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Option<i32>,
    pub batch_id: Option<i32>,
    pub title: Option<String>,
    pub message: String,
    pub channel: Option<String>,
}

pub struct NotificationService;

impl NotificationService {
    /// Creates one unread notification per recipient.
    ///
    /// A `recipient_id` takes precedence over `batch_id`. Batch delivery fans
    /// out to every active enrollment inside a single transaction.
    pub async fn send(
        db: &DatabaseConnection,
        sender: &users::Model,
        request: NewNotification,
    ) -> ServiceResult<Vec<notifications::Model>> {
        let channel = request
            .channel
            .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

        let txn = db.begin().await?;

        let recipient_ids: Vec<i32> = match (request.recipient_id, request.batch_id) {
            (Some(recipient_id), _) => {
                if users::Entity::find_by_id(recipient_id).one(&txn).await?.is_none() {
                    return Err(ServiceError::not_found("Recipient user"));
                }
                vec![recipient_id]
            }
            (None, Some(batch_id)) => {
                let batch = batches::Entity::find_by_id(batch_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Batch"))?;

                if sender.role == Role::Coordinator && batch.coordinator_id != Some(sender.id) {
                    return Err(ServiceError::Forbidden(
                        "Coordinator can send only to their own batch".to_string(),
                    ));
                }

                EnrollmentService::active_in_batch(&txn, batch_id)
                    .await?
                    .into_iter()
                    .map(|e| e.student_id)
                    .collect()
            }
            (None, None) => {
                return Err(ServiceError::BadRequest(
                    "recipient_id or batch_id is required".to_string(),
                ));
            }
        };

        let mut created = Vec::with_capacity(recipient_ids.len());
        for recipient_id in recipient_ids {
            let notification = notifications::ActiveModel {
                recipient_id: Set(recipient_id),
                title: Set(request.title.clone()),
                message: Set(request.message.clone()),
                channel: Set(channel.clone()),
                is_read: Set(false),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            created.push(notification);
        }

        txn.commit().await?;
        info!(
            "User {} sent {} notification(s)",
            sender.id,
            created.len()
        );
        Ok(created)
    }

    /// The recipient's notifications, newest first
    pub async fn list_for(
        db: &DatabaseConnection,
        recipient_id: i32,
        limit: u64,
    ) -> ServiceResult<Vec<notifications::Model>> {
        Ok(notifications::Entity::find()
            .filter(notifications::Column::RecipientId.eq(recipient_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .limit(limit)
            .all(db)
            .await?)
    }

    pub async fn mark_read(
        db: &DatabaseConnection,
        caller: &users::Model,
        id: i32,
    ) -> ServiceResult<notifications::Model> {
        let notification = Self::get(db, id).await?;
        if !caller.role.is_admin() && notification.recipient_id != caller.id {
            return Err(ServiceError::Forbidden("Not authorized".to_string()));
        }
        if notification.is_read {
            return Ok(notification);
        }

        let mut active: notifications::ActiveModel = notification.into();
        active.is_read = Set(true);
        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let notification = Self::get(db, id).await?;
        notification.delete(db).await?;
        Ok(())
    }

    async fn get(db: &DatabaseConnection, id: i32) -> ServiceResult<notifications::Model> {
        notifications::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Notification"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{
            batch::{BatchService, NewBatch},
            enrollment::{EnrollmentChanges, EnrollmentService},
        },
        test_support::{insert_user, setup_db},
    };
    use std::collections::HashSet;

    fn to_batch(batch_id: i32, message: &str) -> NewNotification {
        NewNotification {
            recipient_id: None,
            batch_id: Some(batch_id),
            title: None,
            message: message.to_string(),
            channel: None,
        }
    }

    async fn batch(db: &DatabaseConnection, coordinator_id: Option<i32>) -> batches::Model {
        BatchService::create(
            db,
            NewBatch {
                name: "G10-A".to_string(),
                description: None,
                coordinator_id,
                start_date: None,
                end_date: None,
                is_active: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_batch_send_fans_out_to_active_enrollments() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let batch = batch(&db, None).await;

        let mut expected = HashSet::new();
        for name in ["s1", "s2", "s3"] {
            let student = insert_user(&db, name, Role::Student).await;
            EnrollmentService::enroll(&db, student.id, batch.id, None)
                .await
                .unwrap();
            expected.insert(student.id);
        }
        let inactive = insert_user(&db, "s4", Role::Student).await;
        let enrollment = EnrollmentService::enroll(&db, inactive.id, batch.id, None)
            .await
            .unwrap();
        EnrollmentService::update(
            &db,
            enrollment.id,
            EnrollmentChanges {
                is_active: Some(false),
                role_in_batch: None,
            },
        )
        .await
        .unwrap();

        let sent = NotificationService::send(&db, &admin, to_batch(batch.id, "Exam tomorrow"))
            .await
            .unwrap();

        assert_eq!(sent.len(), 3);
        let recipients: HashSet<i32> = sent.iter().map(|n| n.recipient_id).collect();
        assert_eq!(recipients, expected);
        for notification in &sent {
            assert!(!notification.is_read);
            assert_eq!(notification.message, "Exam tomorrow");
            assert_eq!(notification.channel, "in-app");
        }
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let db = setup_db().await;
        let teacher = insert_user(&db, "tara", Role::Teacher).await;
        let batch = batch(&db, None).await;

        let sent = NotificationService::send(&db, &teacher, to_batch(batch.id, "Hello"))
            .await
            .unwrap();
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn test_direct_send_wins_over_batch() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        let batch = batch(&db, None).await;

        let sent = NotificationService::send(
            &db,
            &admin,
            NewNotification {
                recipient_id: Some(student.id),
                batch_id: Some(batch.id),
                title: Some("Fees".to_string()),
                message: "Fee due Friday".to_string(),
                channel: Some("email".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_id, student.id);
        assert_eq!(sent[0].channel, "email");
        assert_eq!(sent[0].title.as_deref(), Some("Fees"));
    }

    #[tokio::test]
    async fn test_send_validation_errors() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;

        let no_target = NotificationService::send(
            &db,
            &admin,
            NewNotification {
                recipient_id: None,
                batch_id: None,
                title: None,
                message: "?".to_string(),
                channel: None,
            },
        )
        .await;
        assert!(matches!(no_target, Err(ServiceError::BadRequest(_))));

        let no_batch = NotificationService::send(&db, &admin, to_batch(99, "?")).await;
        assert!(matches!(no_batch, Err(ServiceError::NotFound(_))));

        let no_user = NotificationService::send(
            &db,
            &admin,
            NewNotification {
                recipient_id: Some(99),
                batch_id: None,
                title: None,
                message: "?".to_string(),
                channel: None,
            },
        )
        .await;
        assert!(matches!(no_user, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_coordinator_limited_to_own_batch() {
        let db = setup_db().await;
        let owner = insert_user(&db, "meera", Role::Coordinator).await;
        let other = insert_user(&db, "kiran", Role::Coordinator).await;
        let own = batch(&db, Some(owner.id)).await;
        let unassigned = batch(&db, None).await;

        assert!(NotificationService::send(&db, &owner, to_batch(own.id, "hi"))
            .await
            .is_ok());

        let foreign = NotificationService::send(&db, &other, to_batch(own.id, "hi")).await;
        assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));

        let orphan = NotificationService::send(&db, &other, to_batch(unassigned.id, "hi")).await;
        assert!(matches!(orphan, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_list_mark_read_and_delete() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let student = insert_user(&db, "ravi", Role::Student).await;
        let stranger = insert_user(&db, "omar", Role::Student).await;

        let mut sent_ids = Vec::new();
        for message in ["one", "two", "three"] {
            let sent = NotificationService::send(
                &db,
                &admin,
                NewNotification {
                    recipient_id: Some(student.id),
                    batch_id: None,
                    title: None,
                    message: message.to_string(),
                    channel: None,
                },
            )
            .await
            .unwrap();
            sent_ids.push(sent[0].id);
        }

        let latest_two: Vec<i32> = NotificationService::list_for(&db, student.id, 2)
            .await
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(latest_two, vec![sent_ids[2], sent_ids[1]]);

        let denied = NotificationService::mark_read(&db, &stranger, sent_ids[0]).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        let read = NotificationService::mark_read(&db, &student, sent_ids[0])
            .await
            .unwrap();
        assert!(read.is_read);

        NotificationService::delete(&db, sent_ids[0]).await.unwrap();
        let gone = NotificationService::mark_read(&db, &admin, sent_ids[0]).await;
        assert!(matches!(gone, Err(ServiceError::NotFound(_))));
    }
}
