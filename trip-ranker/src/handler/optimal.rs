//! Optimal route handler: the single fastest trip for a search.

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::ns::{Trip, TripSource};
use crate::planner::select_fastest;

use super::error::HandlerError;
use super::gateway::{GatewayRequest, HandlerResponse};
use super::params::{ParameterError, trip_query};

/// Reported when the request has no query string at all.
pub const MISSING_QUERY_STRING: &str = "Missing query string parameters";
/// Reported when some required parameters are missing.
pub const MISSING_REQUIRED_PARAMETERS: &str = "Missing required query string parameters";

/// Handle an optimal route request.
///
/// Internal failures are reported with the error chain as `stack` and the
/// received request as `input` to ease debugging.
pub async fn check_optimal_route<T: TripSource>(
    trips: &T,
    request: &GatewayRequest,
) -> HandlerResponse {
    match find_optimal_route(trips, request).await {
        Ok(body) => HandlerResponse::ok(body),
        Err(err) => {
            warn!(status = err.status_code(), error = %err, "Optimal route request failed");
            let mut response = err.to_response();
            if err.is_internal() {
                response.body["stack"] = json!(err.chain());
                response.body["input"] = serde_json::to_value(request).unwrap_or(Value::Null);
            }
            response
        }
    }
}

async fn find_optimal_route<T: TripSource>(
    source: &T,
    request: &GatewayRequest,
) -> Result<Value, HandlerError> {
    let query = trip_query(request.query_string_parameters.as_ref()).map_err(|e| match e {
        ParameterError::Absent => HandlerError::MissingParameters(MISSING_QUERY_STRING),
        ParameterError::Incomplete => HandlerError::MissingParameters(MISSING_REQUIRED_PARAMETERS),
    })?;

    let trips: Vec<Trip> = source.fetch_trips(&query).await?;
    let fastest = select_fastest(&trips).ok_or(HandlerError::NoDataAvailable)?;

    info!(
        from = %query.from_station,
        to = %query.to_station,
        candidates = trips.len(),
        "Selected fastest trip"
    );
    Ok(serde_json::to_value(fastest)?)
}
