//! Gateway-shaped request and response values.
//!
//! Mirrors the proxy event format of an HTTP-triggered function: query
//! parameters arrive as an optional string map, and the response is a status
//! code plus a JSON body rendered to a string.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    /// Query string parameters. `None` when the request had no query string
    /// at all, which is reported differently from a partial one.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    /// Remaining event fields, kept so they can be echoed back for debugging.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GatewayRequest {
    /// Build a request from a query parameter map.
    pub fn with_parameters(params: HashMap<String, String>) -> Self {
        Self {
            query_string_parameters: Some(params),
            ..Default::default()
        }
    }

    /// Build a request from `(name, value)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::with_parameters(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Outcome of a handler: status code and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: Value,
}

impl HandlerResponse {
    /// Create a response with the given status and body.
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    /// 200 with the given body.
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// Render into the gateway wire format.
    pub fn into_gateway(self) -> GatewayResponse {
        GatewayResponse {
            status_code: self.status_code,
            headers: HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body: self.body.to_string(),
        }
    }
}

/// Response in the gateway wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_parameters_are_absent() {
        let request: GatewayRequest =
            serde_json::from_value(json!({ "queryStringParameters": null, "path": "/trips" }))
                .unwrap();

        assert!(request.query_string_parameters.is_none());
        assert_eq!(request.extra.get("path"), Some(&json!("/trips")));
    }

    #[test]
    fn missing_parameters_are_absent() {
        let request: GatewayRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.query_string_parameters.is_none());
    }

    #[test]
    fn parameters_parsed() {
        let request: GatewayRequest = serde_json::from_value(json!({
            "queryStringParameters": { "arrivalStation": "Amsterdam" }
        }))
        .unwrap();

        let params = request.query_string_parameters.unwrap();
        assert_eq!(params.get("arrivalStation").map(String::as_str), Some("Amsterdam"));
    }

    #[test]
    fn gateway_response_renders_body() {
        let response = HandlerResponse::new(404, json!({ "error": "No data available" }));
        let gateway = response.into_gateway();

        assert_eq!(gateway.status_code, 404);
        assert_eq!(gateway.headers["Content-Type"], "application/json");

        let body: Value = serde_json::from_str(&gateway.body).unwrap();
        assert_eq!(body["error"], "No data available");

        let wire = serde_json::to_value(&gateway).unwrap();
        assert_eq!(wire["statusCode"], 404);
    }
}
