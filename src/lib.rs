pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod proximity;
pub mod routes;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use proximity::ProximityEngine;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Config,
    pub engine: ProximityEngine,
}
