use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Inbound ids longer than this are replaced with a generated one
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Per-request correlation context, injected into request extensions
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub id: String,
    pub received_at: DateTime<Utc>,
    pub method: String,
    pub path: String,
}

impl RequestContext {
    pub fn from_request(request: &Request) -> Self {
        Self {
            id: resolve_request_id(request.headers()),
            received_at: Utc::now(),
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
        }
    }
}

/// Reuse a caller-supplied `X-Request-Id` when usable, otherwise mint a UUID v4
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(ToString::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Tag the request with a correlation id, run the rest of the chain inside a
/// span carrying it, and echo it on the response
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext::from_request(&request);
    let span = tracing::info_span!(
        "http.request",
        request_id = %context.id,
        method = %context.method,
        path = %context.path,
    );

    request.extensions_mut().insert(context.clone());

    let started = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;

    if config::config().api.enable_request_logging {
        span.in_scope(|| {
            tracing::info!(
                status = response.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request completed"
            );
        });
    }

    match HeaderValue::from_str(&context.id) {
        Ok(value) => {
            response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
        }
        Err(e) => tracing::warn!("Request id {:?} is not a valid header value: {}", context.id, e),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_inbound_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));
        assert_eq!(resolve_request_id(&headers), "abc-123");
    }

    #[test]
    fn trims_inbound_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("  abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");
    }

    #[test]
    fn generates_uuid_when_missing_blank_or_oversized() {
        let mut headers = HeaderMap::new();
        let generated = resolve_request_id(&headers);
        assert!(Uuid::parse_str(&generated).is_ok());

        headers.insert("x-request-id", HeaderValue::from_static("   "));
        assert!(Uuid::parse_str(&resolve_request_id(&headers)).is_ok());

        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        headers.insert("x-request-id", HeaderValue::from_str(&long).unwrap());
        assert!(Uuid::parse_str(&resolve_request_id(&headers)).is_ok());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let headers = HeaderMap::new();
        assert_ne!(resolve_request_id(&headers), resolve_request_id(&headers));
    }
}
