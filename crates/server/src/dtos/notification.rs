use chrono::{DateTime, FixedOffset};
use database::{
    entities::notifications,
    services::notification::{DEFAULT_LIST_LIMIT, NewNotification},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub recipient_id: i32,
    pub title: Option<String>,
    pub message: String,
    pub channel: String,
    pub is_read: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl From<notifications::Model> for NotificationResponse {
    fn from(notification: notifications::Model) -> Self {
        Self {
            id: notification.id,
            recipient_id: notification.recipient_id,
            title: notification.title,
            message: notification.message,
            channel: notification.channel,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

/// Either `recipient_id` or `batch_id` must be present; `recipient_id` wins
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendNotificationRequest {
    pub recipient_id: Option<i32>,
    pub batch_id: Option<i32>,
    pub title: Option<String>,
    pub message: String,
    /// Defaults to `in-app`
    pub channel: Option<String>,
}

impl From<SendNotificationRequest> for NewNotification {
    fn from(req: SendNotificationRequest) -> Self {
        Self {
            recipient_id: req.recipient_id,
            batch_id: req.batch_id,
            title: req.title,
            message: req.message,
            channel: req.channel,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InboxQueryParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}
