//! Request handlers.
//!
//! Two independent handlers share the same shape: validate the query
//! parameters, search trips upstream, rank, and answer with a status code
//! and JSON body.
//!
//! - [`check_optimal_route`] returns the single fastest trip.
//! - [`sort_route_by_comfort`] enriches trips with per-train detail and
//!   returns the most and least comfortable ones.
//!
//! Handlers never fail: every error is rendered into a [`HandlerResponse`].

mod comfort;
mod error;
mod gateway;
mod optimal;
mod params;

pub use comfort::{ComfortRanking, sort_route_by_comfort};
pub use error::{HandlerError, NO_DATA_AVAILABLE};
pub use gateway::{GatewayRequest, GatewayResponse, HandlerResponse};
pub use optimal::{MISSING_QUERY_STRING, MISSING_REQUIRED_PARAMETERS, check_optimal_route};
pub use params::{
    ARRIVAL_STATION, DEPARTURE_DATE, DEPARTURE_STATION, ParameterError, trip_query,
};
