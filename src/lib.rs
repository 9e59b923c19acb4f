pub mod config;
pub mod error;
pub mod geocoding;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use geocoding::Geocoder;

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            config: Arc::new(config),
        }
    }
}
