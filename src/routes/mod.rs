use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{fare, health};
use crate::middleware::logging::log_request;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let ride_routes = Router::new().route("/fare", post(fare::calculate_fare));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/rides", ride_routes)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
