use super::parse_enum;
use crate::error::ApiError;
use chrono::{DateTime, FixedOffset};
use database::{
    entities::contents,
    services::content::{ContentFilter, NewContent},
};
use models::content_type::ContentType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct ContentResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub storage_url: String,
    pub uploader_id: i32,
    pub batch_id: Option<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub is_public: bool,
}

impl From<contents::Model> for ContentResponse {
    fn from(content: contents::Model) -> Self {
        Self {
            id: content.id,
            title: content.title,
            description: content.description,
            content_type: content.content_type.to_string(),
            storage_url: content.storage_url,
            uploader_id: content.uploader_id,
            batch_id: content.batch_id,
            created_at: content.created_at,
            is_public: content.is_public,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadContentRequest {
    pub title: String,
    pub storage_url: String,
    pub description: Option<String>,
    /// `video` (default), `pdf`, `image` or `other`
    pub content_type: Option<String>,
    pub batch_id: Option<i32>,
    #[serde(default)]
    pub is_public: bool,
}

impl TryFrom<UploadContentRequest> for NewContent {
    type Error = ApiError;

    fn try_from(req: UploadContentRequest) -> Result<Self, Self::Error> {
        let content_type = match req.content_type.as_deref() {
            Some(name) => parse_enum::<ContentType>("content_type", name)?,
            None => ContentType::default(),
        };

        Ok(Self {
            title: req.title,
            storage_url: req.storage_url,
            description: req.description,
            content_type,
            batch_id: req.batch_id,
            is_public: req.is_public,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ContentQueryParams {
    pub batch_id: Option<i32>,
    #[serde(default)]
    pub only_public: bool,
}

impl From<ContentQueryParams> for ContentFilter {
    fn from(params: ContentQueryParams) -> Self {
        Self {
            batch_id: params.batch_id,
            only_public: params.only_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content_type: Option<&str>) -> UploadContentRequest {
        UploadContentRequest {
            title: "Kinematics".to_string(),
            storage_url: "s3://bucket/kinematics.mp4".to_string(),
            description: None,
            content_type: content_type.map(str::to_owned),
            batch_id: None,
            is_public: false,
        }
    }

    #[test]
    fn test_content_type_defaults_to_video() {
        let content = NewContent::try_from(request(None)).unwrap();
        assert_eq!(content.content_type, ContentType::Video);
    }

    #[test]
    fn test_unknown_content_type_rejected() {
        let err = NewContent::try_from(request(Some("hologram"))).unwrap_err();
        assert!(err.0.to_string().contains("hologram"));
    }
}
