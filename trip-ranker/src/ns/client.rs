//! NS Reisinformatie HTTP client.
//!
//! Provides async methods for the trip search and journey detail endpoints.
//! Handles subscription-key authentication and bounds outbound concurrency.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::NsError;
use super::types::{JourneyDetail, JourneyResponse, Trip, TripsResponse};
use super::{JourneyDetailSource, TripSource};

/// Default base URL for the NS Reisinformatie API.
pub const DEFAULT_BASE_URL: &str = "https://gateway.apiportal.ns.nl/reisinformatie-api";

/// Header carrying the API subscription key.
const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";

/// Default cap on in-flight requests.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`NsClient`]. Filled in from the environment by
/// `AppConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_concurrent: usize,
    pub timeout: Duration,
}

impl Default for NsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A validated trip search: origin, destination and departure moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripQuery {
    /// Station the journey starts from.
    pub from_station: String,
    /// Station the journey ends at.
    pub to_station: String,
    /// Departure moment, passed to the API uninterpreted.
    pub date_time: String,
}

impl TripQuery {
    /// Query string pairs in the form the trip search endpoint expects.
    pub fn as_query(&self) -> [(&'static str, &str); 3] {
        [
            ("fromStation", self.from_station.as_str()),
            ("toStation", self.to_station.as_str()),
            ("dateTime", self.date_time.as_str()),
        ]
    }
}

/// NS Reisinformatie API client.
///
/// Cheap to clone; clones share the connection pool and the semaphore.
#[derive(Debug, Clone)]
pub struct NsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl NsClient {
    /// Create a new NS client with the given configuration.
    pub fn new(config: NsConfig) -> Result<Self, NsError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| NsError::Config("Invalid API key format".to_string()))?;
        headers.insert(HeaderName::from_static(SUBSCRIPTION_KEY_HEADER), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Search trips between two stations.
    pub async fn get_trips(&self, query: &TripQuery) -> Result<Vec<Trip>, NsError> {
        let url = format!("{}/api/v3/trips", self.base_url);
        let body = self.get_json(&url, &query.as_query()).await?;

        let response: TripsResponse =
            serde_json::from_str(&body).map_err(|e| NsError::json(e, &body))?;

        debug!(
            from = %query.from_station,
            to = %query.to_station,
            trips = response.trips.len(),
            "Fetched trips"
        );
        Ok(response.trips)
    }

    /// Get stock and facility detail for one train product number.
    pub async fn get_journey_detail(&self, product_number: &str) -> Result<JourneyDetail, NsError> {
        let url = format!("{}/api/v2/journey", self.base_url);
        let body = self.get_json(&url, &[("train", product_number)]).await?;

        let response: JourneyResponse =
            serde_json::from_str(&body).map_err(|e| NsError::json(e, &body))?;

        Ok(response.payload)
    }

    /// Issue a GET and return the body of a successful response.
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<String, NsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| NsError::Config("Semaphore closed".to_string()))?;

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

impl TripSource for NsClient {
    async fn fetch_trips(&self, query: &TripQuery) -> Result<Vec<Trip>, NsError> {
        self.get_trips(query).await
    }
}

impl JourneyDetailSource for NsClient {
    async fn fetch_journey_detail(&self, product_number: &str) -> Result<JourneyDetail, NsError> {
        self.get_journey_detail(product_number).await
    }
}
