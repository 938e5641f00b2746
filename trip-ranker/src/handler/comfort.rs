//! Comfort route handler: the most and least comfortable trips for a search.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{DetailCache, DetailStore};
use crate::ns::{JourneyDetailSource, TripSource};
use crate::planner::{ScoredTrip, distinct_product_numbers, enrich_trips, rank_by_comfort};

use super::error::HandlerError;
use super::gateway::{GatewayRequest, HandlerResponse};
use super::params::trip_query;

/// Reported when required parameters are absent, whether the query string
/// is missing entirely or only partially filled in.
pub const MISSING_REQUIRED_PARAMETERS: &str = "Missing required query string parameters";

/// Successful comfort ranking body.
#[derive(Debug, Serialize)]
pub struct ComfortRanking<'a> {
    pub best: &'a ScoredTrip,
    pub worst: &'a ScoredTrip,
}

/// Handle a comfort route request.
pub async fn sort_route_by_comfort<T, C, S>(
    trips: &T,
    details: &DetailCache<C, S>,
    request: &GatewayRequest,
) -> HandlerResponse
where
    T: TripSource,
    C: JourneyDetailSource,
    S: DetailStore,
{
    match rank_routes(trips, details, request).await {
        Ok(body) => HandlerResponse::ok(body),
        Err(err) => {
            warn!(status = err.status_code(), error = %err, "Comfort route request failed");
            err.to_response()
        }
    }
}

async fn rank_routes<T, C, S>(
    source: &T,
    details: &DetailCache<C, S>,
    request: &GatewayRequest,
) -> Result<Value, HandlerError>
where
    T: TripSource,
    C: JourneyDetailSource,
    S: DetailStore,
{
    let query = trip_query(request.query_string_parameters.as_ref())
        .map_err(|_| HandlerError::MissingParameters(MISSING_REQUIRED_PARAMETERS))?;

    let trips = source.fetch_trips(&query).await?;
    if trips.is_empty() {
        return Err(HandlerError::NoDataAvailable);
    }

    let product_numbers = distinct_product_numbers(&trips);
    let resolved = details.resolve_all(&product_numbers).await?;

    let ranked = rank_by_comfort(enrich_trips(&trips, &resolved));
    let (Some(best), Some(worst)) = (ranked.first(), ranked.last()) else {
        return Err(HandlerError::NoDataAvailable);
    };

    info!(
        from = %query.from_station,
        to = %query.to_station,
        candidates = ranked.len(),
        trains = product_numbers.len(),
        best = best.points,
        worst = worst.points,
        "Ranked trips by comfort"
    );
    Ok(serde_json::to_value(ComfortRanking { best, worst })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryStore, StoreError};
    use crate::ns::{JourneyDetail, NsError, Trip, TripQuery};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock NS API serving canned trips and journey details.
    #[derive(Default)]
    struct MockNs {
        trips: Option<Value>,
        trip_error: Option<(u16, &'static str)>,
        details: HashMap<String, Value>,
        trip_calls: Mutex<usize>,
        detail_calls: Mutex<Vec<String>>,
    }

    impl MockNs {
        fn with_trips(trips: Value) -> Self {
            Self {
                trips: Some(trips),
                ..Default::default()
            }
        }

        fn with_detail(mut self, number: &str, detail: Value) -> Self {
            self.details.insert(number.to_string(), detail);
            self
        }

        fn detail_calls(&self) -> Vec<String> {
            self.detail_calls.lock().unwrap().clone()
        }
    }

    impl TripSource for MockNs {
        async fn fetch_trips(&self, _query: &TripQuery) -> Result<Vec<Trip>, NsError> {
            *self.trip_calls.lock().unwrap() += 1;
            if let Some((status, body)) = self.trip_error {
                return Err(NsError::Api {
                    status,
                    body: body.to_string(),
                });
            }
            let trips = self.trips.clone().unwrap_or_else(|| json!([]));
            Ok(serde_json::from_value(trips).unwrap())
        }
    }

    impl JourneyDetailSource for MockNs {
        async fn fetch_journey_detail(&self, product_number: &str) -> Result<JourneyDetail, NsError> {
            self.detail_calls
                .lock()
                .unwrap()
                .push(product_number.to_string());
            match self.details.get(product_number) {
                Some(detail) => Ok(serde_json::from_value(detail.clone()).unwrap()),
                None => Err(NsError::Api {
                    status: 404,
                    body: r#"{"message":"Journey not found"}"#.to_string(),
                }),
            }
        }
    }

    /// Store that fails every write.
    struct ReadOnlyStore;

    impl DetailStore for ReadOnlyStore {
        async fn get(&self, _product_number: &str) -> Result<Option<Arc<JourneyDetail>>, StoreError> {
            Ok(None)
        }

        async fn put(
            &self,
            product_number: &str,
            _detail: Arc<JourneyDetail>,
        ) -> Result<(), StoreError> {
            Err(StoreError::Io {
                key: product_number.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn valid_request() -> GatewayRequest {
        GatewayRequest::from_pairs([
            ("arrivalStation", "Amsterdam"),
            ("departureStation", "Rotterdam"),
            ("departureDate", "2023-10-10T10:00:00"),
        ])
    }

    fn detail(numbers: &[&str], facilities: &[&str]) -> Value {
        json!({
            "productNumbers": numbers,
            "stops": [{ "actualStock": { "trainParts": [{ "facilities": facilities }] } }]
        })
    }

    fn leg(number: &str, crowd: &str) -> Value {
        json!({ "product": { "number": number }, "crowdForecast": crowd })
    }

    fn cache(ns: &Arc<MockNs>) -> DetailCache<Arc<MockNs>, MemoryStore> {
        DetailCache::new(ns.clone(), MemoryStore::default())
    }

    #[tokio::test]
    async fn absent_parameters() {
        let ns = Arc::new(MockNs::default());
        let response = sort_route_by_comfort(&*ns, &cache(&ns), &GatewayRequest::default()).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            json!({ "error": "Missing required query string parameters" })
        );
        assert_eq!(*ns.trip_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn partial_parameters() {
        let ns = Arc::new(MockNs::default());
        let request = GatewayRequest::from_pairs([("arrivalStation", "Amsterdam")]);

        let response = sort_route_by_comfort(&*ns, &cache(&ns), &request).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body["error"],
            "Missing required query string parameters"
        );
    }

    #[tokio::test]
    async fn empty_result_is_not_found() {
        let ns = Arc::new(MockNs::with_trips(json!([])));

        let response = sort_route_by_comfort(&*ns, &cache(&ns), &valid_request()).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, json!({ "error": "No data available" }));
    }

    #[tokio::test]
    async fn upstream_failure_forwarded() {
        let ns = Arc::new(MockNs {
            trip_error: Some((404, r#"{"error":"No data available"}"#)),
            ..Default::default()
        });

        let response = sort_route_by_comfort(&*ns, &cache(&ns), &valid_request()).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body["error"], "No data available");
    }

    #[tokio::test]
    async fn best_and_worst_by_comfort() {
        let ns = Arc::new(
            MockNs::with_trips(json!([
                // 1 facility + HIGH(3) - 1 transfer = 3
                { "uid": "middle", "transfers": 1, "legs": [leg("100", "HIGH")] },
                // 3 facilities + LOW(5) - 0 = 8
                { "uid": "best", "transfers": 0, "legs": [leg("200", "LOW")] },
                // (1 facility + VERY_HIGH 2) + walking leg 1 - 2 transfers = 2
                { "uid": "worst", "transfers": 2, "legs": [
                    leg("100", "VERY_HIGH"),
                    { "travelType": "WALK" }
                ] }
            ]))
            .with_detail("100", detail(&["100"], &["WIFI"]))
            .with_detail("200", detail(&["200"], &["WIFI", "STROOM", "TOILET"])),
        );

        let response = sort_route_by_comfort(&*ns, &cache(&ns), &valid_request()).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["best"]["uid"], "best");
        assert_eq!(response.body["best"]["points"], 8);
        assert_eq!(response.body["worst"]["uid"], "worst");
        assert_eq!(response.body["worst"]["points"], 2);
        assert_eq!(
            response.body["best"]["legs"][0]["journeyDetail"]["productNumbers"],
            json!(["200"])
        );

        let mut calls = ns.detail_calls();
        calls.sort();
        assert_eq!(calls, vec!["100", "200"]);
    }

    #[tokio::test]
    async fn single_trip_is_best_and_worst() {
        let ns = Arc::new(
            MockNs::with_trips(json!([
                { "uid": "only", "transfers": 1, "legs": [leg("100", "LOW")] }
            ]))
            .with_detail("100", detail(&["100"], &["WIFI", "TOILET"])),
        );

        let response = sort_route_by_comfort(&*ns, &cache(&ns), &valid_request()).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["best"], response.body["worst"]);
        assert_eq!(response.body["best"]["points"], 6);
    }

    #[tokio::test]
    async fn second_request_served_from_cache() {
        let ns = Arc::new(
            MockNs::with_trips(json!([
                { "transfers": 0, "legs": [leg("100", "LOW")] }
            ]))
            .with_detail("100", detail(&["100"], &[])),
        );
        let details = cache(&ns);

        sort_route_by_comfort(&*ns, &details, &valid_request()).await;
        sort_route_by_comfort(&*ns, &details, &valid_request()).await;

        assert_eq!(ns.detail_calls(), vec!["100"]);
    }

    #[tokio::test]
    async fn detail_failure_fails_request() {
        let ns = Arc::new(MockNs::with_trips(json!([
            { "transfers": 0, "legs": [leg("100", "LOW")] }
        ])));

        let response = sort_route_by_comfort(&*ns, &cache(&ns), &valid_request()).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body["message"], "Journey not found");
    }

    #[tokio::test]
    async fn store_write_failure_is_internal_error() {
        let ns = Arc::new(
            MockNs::with_trips(json!([
                { "transfers": 0, "legs": [leg("100", "LOW")] }
            ]))
            .with_detail("100", detail(&["100"], &[])),
        );
        let details = DetailCache::new(ns.clone(), ReadOnlyStore);

        let response = sort_route_by_comfort(&*ns, &details, &valid_request()).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            json!({ "error": "store I/O error for 100: read-only" })
        );
    }
}
