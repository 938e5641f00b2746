use tracing::info;

use trip_ranker::cache::ProductStore;
use trip_ranker::config::AppConfig;
use trip_ranker::ns::NsClient;
use trip_ranker::telemetry::init_logger;
use trip_ranker::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    init_logger();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let ns = NsClient::new(config.ns.clone()).expect("Failed to create NS client");
    let store = ProductStore::from_config(&config.cache).await;
    info!(
        backend = ?config.cache.backend,
        table = %config.cache.table_name,
        "Journey detail cache ready"
    );

    let app = create_router(AppState::new(ns, store));

    let addr = config.bind_addr;
    info!(%addr, "Trip ranker listening");
    info!("  GET /health");
    info!("  GET /optimal-route?departureStation=..&arrivalStation=..&departureDate=..");
    info!("  GET /comfort-route?departureStation=..&arrivalStation=..&departureDate=..");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
