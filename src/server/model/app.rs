use sea_orm::DatabaseConnection;

use crate::server::service::moderation::ModerationPolicy;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Role thresholds loaded from configuration
    pub policy: ModerationPolicy,
}

impl From<(DatabaseConnection, ModerationPolicy)> for AppState {
    fn from((db, policy): (DatabaseConnection, ModerationPolicy)) -> Self {
        Self { db, policy }
    }
}

/// State with the default moderation thresholds.
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            policy: ModerationPolicy::default(),
        }
    }
}
