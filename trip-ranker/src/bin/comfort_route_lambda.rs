//! Function deployment of the comfort route handler.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};

use trip_ranker::cache::{DetailCache, ProductStore};
use trip_ranker::config::AppConfig;
use trip_ranker::handler::{GatewayRequest, GatewayResponse, sort_route_by_comfort};
use trip_ranker::ns::NsClient;
use trip_ranker::telemetry::init_logger;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logger();

    let config = AppConfig::from_env()?;
    let ns = NsClient::new(config.ns)?;
    let store = ProductStore::from_config(&config.cache).await;
    let details = DetailCache::new(ns.clone(), store);
    let (ns, details) = (&ns, &details);

    run(service_fn(move |event: LambdaEvent<GatewayRequest>| async move {
        let response = sort_route_by_comfort(ns, details, &event.payload).await;
        Ok::<GatewayResponse, Error>(response.into_gateway())
    }))
    .await
}
