use chrono::{DateTime, FixedOffset};
use database::entities::comments;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub content_id: i32,
    pub author_id: i32,
    pub text: String,
    pub created_at: DateTime<FixedOffset>,
    pub is_public: bool,
}

impl From<comments::Model> for CommentResponse {
    fn from(comment: comments::Model) -> Self {
        Self {
            id: comment.id,
            content_id: comment.content_id,
            author_id: comment.author_id,
            text: comment.text,
            created_at: comment.created_at,
            is_public: comment.is_public,
        }
    }
}

/// Body for `POST /contents/{id}/comments`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentTextRequest {
    pub text: String,
}

/// Body for `POST /comments`
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content_id: i32,
    pub text: String,
}
