use crate::state::AppState;
use chrono::Utc;
use database::entities::users;
use migration::{Migrator, MigratorTrait};
use models::role::Role;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database};

/// State backed by a migrated in-memory SQLite database
pub async fn test_state() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    AppState { db }
}

pub async fn insert_user(state: &AppState, name: &str, role: Role) -> users::Model {
    let now = Utc::now();
    users::ActiveModel {
        firebase_uid: Set(format!("uid-{name}")),
        email: Set(format!("{name}@example.com")),
        full_name: Set(Some(name.to_string())),
        is_active: Set(true),
        is_verified: Set(false),
        role: Set(role),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .unwrap()
}
