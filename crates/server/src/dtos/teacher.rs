use crate::error::ApiError;
use chrono::{DateTime, FixedOffset};
use database::{entities::teachers, services::teacher::TeacherProfile};
use models::subjects::SubjectList;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: i32,
    pub user_id: i32,
    pub subjects: Vec<String>,
    pub experience: Option<i32>,
    pub qualifications: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<teachers::Model> for TeacherResponse {
    fn from(teacher: teachers::Model) -> Self {
        Self {
            id: teacher.id,
            user_id: teacher.user_id,
            subjects: teacher.subjects.into_inner(),
            experience: teacher.experience,
            qualifications: teacher.qualifications,
            created_at: teacher.created_at,
        }
    }
}

/// Full profile; an update replaces every field
#[derive(Debug, Deserialize, ToSchema)]
pub struct TeacherRequest {
    #[serde(default)]
    pub subjects: Vec<String>,
    pub experience: Option<i32>,
    pub qualifications: Option<String>,
}

impl TryFrom<TeacherRequest> for TeacherProfile {
    type Error = ApiError;

    fn try_from(req: TeacherRequest) -> Result<Self, Self::Error> {
        let subjects =
            SubjectList::new(req.subjects).map_err(|err| ApiError::bad_request(err.to_string()))?;

        Ok(Self {
            subjects,
            experience: req.experience,
            qualifications: req.qualifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_with_separator_rejected() {
        let req = TeacherRequest {
            subjects: vec!["Math".to_string(), "Arts, Crafts".to_string()],
            experience: Some(4),
            qualifications: None,
        };

        assert!(TeacherProfile::try_from(req).is_err());
    }

    #[test]
    fn test_subjects_kept_in_order() {
        let req = TeacherRequest {
            subjects: vec!["Physics".to_string(), "Math".to_string()],
            experience: None,
            qualifications: Some("M.Sc".to_string()),
        };

        let profile = TeacherProfile::try_from(req).unwrap();
        assert_eq!(profile.subjects.as_slice(), ["Physics", "Math"]);
    }
}
