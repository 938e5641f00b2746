//! Fastest-trip selection.

use crate::ns::Trip;

/// Pick the fastest trip.
///
/// Finds the trip with the shortest planned duration and, independently,
/// the trip with the shortest actual duration. The actual-duration candidate
/// wins unless its actual duration is longer than the planned candidate's
/// planned duration. Trips missing a duration never win that dimension over
/// trips that have one. On equal durations the earlier trip in the list is
/// kept.
///
/// Returns `None` only for an empty list.
pub fn select_fastest(trips: &[Trip]) -> Option<&Trip> {
    let by_planned = trips
        .iter()
        .min_by_key(|t| duration_key(t.planned_duration_in_minutes))?;
    let by_actual = trips
        .iter()
        .min_by_key(|t| duration_key(t.actual_duration_in_minutes))?;

    let actual = duration_key(by_actual.actual_duration_in_minutes);
    let planned = duration_key(by_planned.planned_duration_in_minutes);

    if actual <= planned {
        Some(by_actual)
    } else {
        Some(by_planned)
    }
}

/// Sort key that puts missing durations last.
fn duration_key(minutes: Option<i64>) -> i64 {
    minutes.unwrap_or(i64::MAX)
}
