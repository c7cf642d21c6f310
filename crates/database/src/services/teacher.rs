use crate::{
    entities::{teachers, users},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use models::subjects::SubjectList;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

/// Full teaching profile; updates overwrite every field
#[derive(Debug, Clone, Default)]
pub struct TeacherProfile {
    pub subjects: SubjectList,
    pub experience: Option<i32>,
    pub qualifications: Option<String>,
}

pub struct TeacherService;

impl TeacherService {
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        profile: TeacherProfile,
    ) -> ServiceResult<teachers::Model> {
        if users::Entity::find_by_id(user_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("User"));
        }

        let existing = teachers::Entity::find()
            .filter(teachers::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Teacher profile already exists".to_string(),
            ));
        }

        let teacher = teachers::ActiveModel {
            user_id: Set(user_id),
            subjects: Set(profile.subjects),
            experience: Set(profile.experience),
            qualifications: Set(profile.qualifications),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        Ok(teacher.insert(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> ServiceResult<teachers::Model> {
        teachers::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Teacher"))
    }

    pub async fn get_by_user(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> ServiceResult<teachers::Model> {
        teachers::Entity::find()
            .filter(teachers::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Teacher"))
    }

    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<teachers::Model>> {
        Ok(teachers::Entity::find()
            .order_by_asc(teachers::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        profile: TeacherProfile,
    ) -> ServiceResult<teachers::Model> {
        let teacher = Self::get(db, id).await?;

        let mut active: teachers::ActiveModel = teacher.into();
        active.subjects = Set(profile.subjects);
        active.experience = Set(profile.experience);
        active.qualifications = Set(profile.qualifications);

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> ServiceResult<()> {
        let teacher = Self::get(db, id).await?;
        teacher.delete(db).await?;
        Ok(())
    }
}
