use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use safe_ride_api::{config::Config, geocoding::MapboxClient, routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safe_ride_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    let geocoder = MapboxClient::from_config(&config)?;
    tracing::info!(
        base_url = %config.geocoding_base_url,
        timeout_secs = config.geocoding_timeout.as_secs(),
        retry = config.geocoding_retry,
        "Geocoder configured"
    );

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(config, Arc::new(geocoder));

    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Safe Ride API is running on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
