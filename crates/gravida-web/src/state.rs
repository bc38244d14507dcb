//! Shared application state for the web server.

use std::sync::Arc;

use gravida_db::Database;
use gravida_engine::RiskModels;

/// Shared state injected into every axum handler.
///
/// `models` holds the frozen coefficient tables, built once at startup and
/// only ever read; concurrent scoring needs no locking.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub models: RiskModels,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            models: RiskModels::default(),
        }
    }
}

pub type SharedState = Arc<AppState>;
