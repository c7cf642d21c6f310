use sea_orm::DatabaseConnection;

/// Shared by every handler; the connection is a pool handle
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
