use sea_orm::DatabaseConnection;

/// Per-request handle to the pool; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
