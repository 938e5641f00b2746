//! HTTP transport for the route handlers.
//!
//! Exposes the optimal and comfort handlers as `GET` endpoints taking the
//! same query parameters the function-style deployments receive.

mod routes;
mod state;

pub use routes::{create_router, gateway_request};
pub use state::AppState;
