//! API Gateway proxy integration shape.
//!
//! The proxy event carries the full HTTP envelope. The response carries a
//! status code, the fixed CORS headers, and the JSON body as a string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::handler::{EchoInvocation, EchoOutcome, RequestParts};
use crate::logger::{payload, LogData};
use crate::model::{null_as_default, EchoResponse, ErrorResponse};

/// Incoming API Gateway proxy event. Keys the echo does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub http_method: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    /// Resource template the route matched, e.g. `/{proxy+}`
    #[serde(default)]
    pub resource: Option<String>,

    /// API Gateway sends `null` rather than `{}` when there are none
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub request_context: ProxyRequestContext,
}

/// The parts of the proxy request context used for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequestContext {
    #[serde(default)]
    pub stage: Option<String>,

    #[serde(default)]
    pub request_id: Option<String>,
}

/// Proxy integration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,
}

/// Headers attached to every proxy response.
pub fn response_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

impl ProxyResponse {
    fn with_body(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: response_headers(),
            body,
            is_base64_encoded: false,
        }
    }
}

impl EchoInvocation for ProxyRequest {
    type Outcome = ProxyResponse;
    const RECEIPT_MESSAGE: &'static str = "Processing request";
    const SUCCESS_MESSAGE: &'static str = "Request successfully echoed";

    fn method(&self) -> &str {
        &self.http_method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn receipt_data(&self) -> LogData {
        payload(json!({
            "method": self.http_method,
            "path": self.path,
            "stage": self.request_context.stage,
            "resource": self.resource,
            "request_id": self.request_context.request_id,
            "full_request": format!("{:?}", self),
        }))
    }

    fn into_parts(self) -> RequestParts {
        RequestParts {
            method: self.http_method,
            path: self.path,
            headers: self.headers.unwrap_or_default(),
            query_params: self.query_string_parameters.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
        }
    }
}

impl EchoOutcome for ProxyResponse {
    fn echoed(_response: EchoResponse, body: String) -> Self {
        Self::with_body(200, body)
    }

    fn failed(status_code: u16, _error: ErrorResponse, body: String) -> Self {
        Self::with_body(status_code, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn decodes_a_gateway_event_with_nulls() {
        let event = json!({
            "resource": "/{proxy+}",
            "path": "/test",
            "httpMethod": "GET",
            "headers": null,
            "multiValueHeaders": null,
            "queryStringParameters": null,
            "pathParameters": { "proxy": "test" },
            "requestContext": { "stage": "prod", "requestId": "c6af9ac6", "accountId": "123456789012" },
            "body": null,
            "isBase64Encoded": false
        });

        let request: ProxyRequest = serde_json::from_value(event).unwrap();
        assert_eq!(request.http_method, "GET");
        assert_eq!(request.resource.as_deref(), Some("/{proxy+}"));
        assert_eq!(request.request_context.stage.as_deref(), Some("prod"));

        let parts = request.into_parts();
        assert!(parts.headers.is_empty());
        assert!(parts.query_params.is_empty());
        assert_eq!(parts.body, "");
    }

    #[test]
    fn null_scalars_and_context_decode_as_empty() {
        let event = json!({
            "httpMethod": null,
            "path": null,
            "requestContext": null,
            "isBase64Encoded": null
        });

        let request: ProxyRequest = serde_json::from_value(event).unwrap();
        assert_eq!(request.http_method, "");
        assert_eq!(request.path, "");
        assert!(!request.is_base64_encoded);
        assert_eq!(request.request_context, ProxyRequestContext::default());
    }

    #[test]
    fn receipt_data_carries_transport_metadata() {
        let request = ProxyRequest {
            http_method: "POST".into(),
            path: "/api/echo".into(),
            resource: Some("/api/echo".into()),
            request_context: ProxyRequestContext {
                stage: Some("dev".into()),
                request_id: Some("req-1".into()),
            },
            ..ProxyRequest::default()
        };

        let data = request.receipt_data();
        assert_eq!(data["method"], "POST");
        assert_eq!(data["stage"], "dev");
        assert_eq!(data["resource"], "/api/echo");
        assert_eq!(data["request_id"], "req-1");
        assert!(data["full_request"].as_str().unwrap().contains("/api/echo"));
    }

    #[test]
    fn response_serializes_with_gateway_keys() {
        let response = ProxyResponse::with_body(405, "{}".to_string());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 405);
        assert_eq!(value["body"], "{}");
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(value["headers"]["Access-Control-Allow-Methods"], "GET, POST, OPTIONS");
        assert_eq!(value["headers"]["Access-Control-Allow-Headers"], "Content-Type, Authorization");
        assert_eq!(value["headers"].as_object().map(|h| h.len()), Some(4));
        assert!(matches!(value["headers"], Value::Object(_)));
    }
}
