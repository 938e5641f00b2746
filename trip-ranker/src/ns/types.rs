//! NS Reisinformatie API DTOs.
//!
//! Only the fields the ranking logic reads are typed. Everything else the
//! API sends is kept in a flattened `extra` map so that responses can echo
//! the upstream objects without losing data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response envelope of the trip search endpoint (`/api/v3/trips`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripsResponse {
    /// Candidate itineraries. A missing key is read as no trips.
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// One candidate itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Timetabled duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_duration_in_minutes: Option<i64>,

    /// Real-time duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration_in_minutes: Option<i64>,

    /// Number of changes between trains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfers: Option<i64>,

    /// Crowd forecast for the whole trip (LOW, MEDIUM, HIGH, VERY_HIGH, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_forecast: Option<String>,

    /// Segments of the trip, in travel order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legs: Option<Vec<Leg>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trip {
    /// Legs in travel order; empty when upstream sent none.
    pub fn legs(&self) -> &[Leg] {
        self.legs.as_deref().unwrap_or_default()
    }

    /// Transfer count; zero when upstream sent none.
    pub fn transfer_count(&self) -> i64 {
        self.transfers.unwrap_or(0)
    }
}

/// One segment of a trip, ridden on a single train.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// The train product this leg rides on.
    #[serde(default)]
    pub product: Product,

    /// Crowd forecast for this leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_forecast: Option<String>,

    /// Journey detail attached during enrichment. Shared between every leg
    /// that rides the same train.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub journey_detail: Option<Arc<JourneyDetail>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Leg {
    /// The product number of the train, if the leg has one.
    pub fn product_number(&self) -> Option<&str> {
        let number = self.product.number.as_str();
        (!number.is_empty()).then_some(number)
    }
}

/// Train product of a leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Train number, e.g. "3028". Empty for walking legs.
    #[serde(default)]
    pub number: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response envelope of the journey detail endpoint (`/api/v2/journey`).
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyResponse {
    pub payload: JourneyDetail,
}

/// Stock, facility and crowd detail for one physical train.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyDetail {
    /// Every product number this train runs under. A train that is split or
    /// joined en route lists more than one.
    #[serde(default)]
    pub product_numbers: Vec<String>,

    /// Calling points in order.
    #[serde(default)]
    pub stops: Vec<JourneyStop>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JourneyDetail {
    /// Whether this detail record describes the given product number.
    pub fn covers(&self, product_number: &str) -> bool {
        self.product_numbers.iter().any(|n| n == product_number)
    }
}

/// A calling point within a journey detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStop {
    /// Stock composition as timetabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_stock: Option<Stock>,

    /// Stock composition actually running, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_stock: Option<Stock>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Train composition at a stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(default)]
    pub train_parts: Vec<TrainPart>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One coupled unit of a train.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainPart {
    /// Facility codes such as "WIFI", "STROOM", "TOILET".
    #[serde(default)]
    pub facilities: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
