use crate::{
    entities::{user_auth_providers, users},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::info;
use models::{auth_provider::AuthProvider, role::Role};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, TransactionTrait,
};

/// Profile supplied when a verified identity registers locally
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: Option<String>,
    pub agename: Option<String>,
    pub provider: Option<AuthProvider>,
}

pub struct UserService;

impl UserService {
    /// Creates the local account for an identity-provider subject
    pub async fn register(
        db: &DatabaseConnection,
        external_id: &str,
        new_user: NewUser,
    ) -> ServiceResult<users::Model> {
        let txn = db.begin().await?;

        let existing = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::FirebaseUid.eq(external_id))
                    .add(users::Column::Email.eq(new_user.email.as_str())),
            )
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict("User already registered".to_string()));
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            firebase_uid: Set(external_id.to_owned()),
            auth_provider: Set(new_user.provider),
            email: Set(new_user.email),
            full_name: Set(new_user.full_name),
            is_active: Set(true),
            is_verified: Set(false),
            role: Set(Role::Student),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            agename: Set(new_user.agename),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(provider) = new_user.provider {
            user_auth_providers::ActiveModel {
                user_id: Set(user.id),
                provider: Set(provider),
                provider_uid: Set(external_id.to_owned()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Resolves a verified token subject to its local account
    pub async fn find_by_external_id(
        db: &DatabaseConnection,
        external_id: &str,
    ) -> ServiceResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::FirebaseUid.eq(external_id))
            .one(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> ServiceResult<users::Model> {
        users::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    pub async fn set_role(
        db: &DatabaseConnection,
        id: i32,
        role: Role,
    ) -> ServiceResult<users::Model> {
        let user = Self::get(db, id).await?;

        let mut active: users::ActiveModel = user.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(db).await?)
    }
}
