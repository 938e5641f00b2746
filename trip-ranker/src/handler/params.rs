//! Query parameter validation.

use std::collections::HashMap;

use crate::ns::TripQuery;

/// Station where the journey ends.
pub const ARRIVAL_STATION: &str = "arrivalStation";
/// Station where the journey starts.
pub const DEPARTURE_STATION: &str = "departureStation";
/// Departure moment, forwarded uninterpreted.
pub const DEPARTURE_DATE: &str = "departureDate";

/// Why a request's parameters were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// The request carried no query parameters at all.
    #[error("no query string parameters")]
    Absent,

    /// At least one required parameter is missing or empty.
    #[error("required query string parameters missing")]
    Incomplete,
}

/// Build a trip query from request parameters.
///
/// All of `arrivalStation`, `departureStation` and `departureDate` must be
/// present and non-empty.
pub fn trip_query(params: Option<&HashMap<String, String>>) -> Result<TripQuery, ParameterError> {
    let params = params.ok_or(ParameterError::Absent)?;

    let required = |name: &str| {
        params
            .get(name)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or(ParameterError::Incomplete)
    };

    Ok(TripQuery {
        from_station: required(DEPARTURE_STATION)?,
        to_station: required(ARRIVAL_STATION)?,
        date_time: required(DEPARTURE_DATE)?,
    })
}
