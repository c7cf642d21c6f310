use crate::entities::users;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use models::role::Role;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with every migration applied
pub async fn setup_db() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Unsaved user row, for checks that never touch the database
pub fn user_model(id: i32, role: Role) -> users::Model {
    let now = Utc::now().into();
    users::Model {
        id,
        firebase_uid: format!("uid-{id}"),
        auth_provider: None,
        email: format!("user{id}@example.com"),
        full_name: None,
        is_active: true,
        is_verified: false,
        role,
        created_at: now,
        updated_at: now,
        agename: None,
    }
}

pub async fn insert_user(db: &DatabaseConnection, name: &str, role: Role) -> users::Model {
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
    .insert(db)
    .await
    .unwrap()
}
