//! Function deployment of the optimal route handler.

use lambda_runtime::{Error, LambdaEvent, run, service_fn};

use trip_ranker::config::AppConfig;
use trip_ranker::handler::{GatewayRequest, GatewayResponse, check_optimal_route};
use trip_ranker::ns::NsClient;
use trip_ranker::telemetry::init_logger;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logger();

    let config = AppConfig::from_env()?;
    let ns = NsClient::new(config.ns)?;
    let ns = &ns;

    run(service_fn(move |event: LambdaEvent<GatewayRequest>| async move {
        let response = check_optimal_route(ns, &event.payload).await;
        Ok::<GatewayResponse, Error>(response.into_gateway())
    }))
    .await
}
