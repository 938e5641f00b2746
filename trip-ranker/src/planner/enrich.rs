//! Attaching journey details to trip legs.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ns::{JourneyDetail, Trip};

/// Distinct product numbers ridden by any leg of any trip.
///
/// Returned in first-seen order. Legs without a product number (walks,
/// transfers on foot) are skipped.
pub fn distinct_product_numbers(trips: &[Trip]) -> Vec<String> {
    let mut seen = HashSet::new();

    trips
        .iter()
        .flat_map(Trip::legs)
        .filter_map(|leg| leg.product_number())
        .filter(|number| seen.insert(*number))
        .map(str::to_string)
        .collect()
}

/// Copy `trips` with every leg pointing at its journey detail.
///
/// A leg gets the first detail whose product numbers include the leg's own.
/// Details are shared, not copied: legs riding the same train hold the same
/// `Arc`. Legs without a match are left without detail. The input trips are
/// not modified.
pub fn enrich_trips(trips: &[Trip], details: &[Arc<JourneyDetail>]) -> Vec<Trip> {
    trips
        .iter()
        .map(|trip| {
            let mut enriched = trip.clone();
            for leg in enriched.legs.iter_mut().flatten() {
                leg.journey_detail = leg
                    .product_number()
                    .and_then(|number| details.iter().find(|d| d.covers(number)))
                    .cloned();
            }
            enriched
        })
        .collect()
}
