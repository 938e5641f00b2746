//! HTTP route handlers.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::handler::{GatewayRequest, HandlerResponse, check_optimal_route, sort_route_by_comfort};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/optimal-route", get(optimal_route))
        .route("/comfort-route", get(comfort_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn optimal_route(State(state): State<AppState>, uri: Uri) -> Response {
    match gateway_request(&uri) {
        Ok(request) => check_optimal_route(&state.ns, &request).await.into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

async fn comfort_route(State(state): State<AppState>, uri: Uri) -> Response {
    match gateway_request(&uri) {
        Ok(request) => sort_route_by_comfort(&state.ns, &*state.details, &request)
            .await
            .into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

/// Build a gateway request from a request URI.
///
/// A URI without `?` yields no parameter map at all; `?` followed by nothing
/// yields an empty one. The path is kept in `extra` so it shows up in debug
/// output.
pub fn gateway_request(uri: &Uri) -> Result<GatewayRequest, QueryRejection> {
    let params = uri
        .query()
        .map(|_| Query::<HashMap<String, String>>::try_from_uri(uri).map(|Query(p)| p))
        .transpose()?;

    let mut request = GatewayRequest {
        query_string_parameters: params,
        ..Default::default()
    };
    request
        .extra
        .insert("path".to_string(), Value::String(uri.path().to_string()));
    Ok(request)
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}
