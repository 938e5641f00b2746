//! Comfort ranking for trip candidates.
//!
//! Scores each trip by how pleasant it is likely to be and sorts the
//! candidates best-first.

use serde::Serialize;

use crate::ns::{Leg, Trip};

/// A trip together with its comfort score.
///
/// Serializes as the trip's own fields plus `points`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTrip {
    #[serde(flatten)]
    pub trip: Trip,

    /// Comfort score; higher is better.
    pub points: i64,
}

/// Points awarded for a crowd forecast.
///
/// LOW = 5, MEDIUM = 4, HIGH = 3, VERY_HIGH = 2, anything else
/// (including no forecast) = 1.
pub fn crowd_points(forecast: Option<&str>) -> i64 {
    match forecast {
        Some("LOW") => 5,
        Some("MEDIUM") => 4,
        Some("HIGH") => 3,
        Some("VERY_HIGH") => 2,
        _ => 1,
    }
}

/// Number of facilities across every train part of the leg's actual stock,
/// summed over all stops. Legs without journey detail count zero.
pub fn facility_count(leg: &Leg) -> i64 {
    let Some(detail) = &leg.journey_detail else {
        return 0;
    };

    detail
        .stops
        .iter()
        .filter_map(|stop| stop.actual_stock.as_ref())
        .flat_map(|stock| &stock.train_parts)
        .map(|part| part.facilities.len() as i64)
        .sum()
}

/// Comfort score of a trip.
///
/// Sum over legs of facility count plus crowd points, minus the number of
/// transfers.
pub fn comfort_score(trip: &Trip) -> i64 {
    let legs: i64 = trip
        .legs()
        .iter()
        .map(|leg| facility_count(leg) + crowd_points(leg.crowd_forecast.as_deref()))
        .sum();

    legs - trip.transfer_count()
}

/// Score trips and sort them by comfort, best first.
///
/// The sort is stable: equally scored trips keep their input order.
pub fn rank_by_comfort(trips: Vec<Trip>) -> Vec<ScoredTrip> {
    let mut scored: Vec<ScoredTrip> = trips
        .into_iter()
        .map(|trip| ScoredTrip {
            points: comfort_score(&trip),
            trip,
        })
        .collect();

    scored.sort_by(|a, b| b.points.cmp(&a.points));
    scored
}
