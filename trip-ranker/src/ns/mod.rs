//! NS Reisinformatie API client.
//!
//! This module provides an HTTP client for the Dutch Railways journey
//! planner API, which we use for two things:
//! - trip search between two stations at a given moment
//! - per-train journey detail (stock composition and on-board facilities)
//!
//! Both endpoints authenticate with a static subscription key.

mod client;
mod error;
mod types;

use std::future::Future;
use std::sync::Arc;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT, DEFAULT_TIMEOUT, NsClient, NsConfig, TripQuery,
};
pub use error::NsError;
pub use types::{
    JourneyDetail, JourneyResponse, JourneyStop, Leg, Product, Stock, TrainPart, Trip,
    TripsResponse,
};

/// Source of trip candidates.
///
/// This abstraction allows the handlers to be tested with mock data.
pub trait TripSource: Send + Sync {
    /// Search trips for the given origin, destination and departure moment.
    fn fetch_trips(
        &self,
        query: &TripQuery,
    ) -> impl Future<Output = Result<Vec<Trip>, NsError>> + Send;
}

/// Source of per-train journey detail.
pub trait JourneyDetailSource: Send + Sync {
    /// Fetch the detail record for one train product number.
    fn fetch_journey_detail(
        &self,
        product_number: &str,
    ) -> impl Future<Output = Result<JourneyDetail, NsError>> + Send;
}

impl<T: TripSource> TripSource for Arc<T> {
    fn fetch_trips(
        &self,
        query: &TripQuery,
    ) -> impl Future<Output = Result<Vec<Trip>, NsError>> + Send {
        (**self).fetch_trips(query)
    }
}

impl<T: JourneyDetailSource> JourneyDetailSource for Arc<T> {
    fn fetch_journey_detail(
        &self,
        product_number: &str,
    ) -> impl Future<Output = Result<JourneyDetail, NsError>> + Send {
        (**self).fetch_journey_detail(product_number)
    }
}
