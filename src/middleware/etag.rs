use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use futures::{stream, StreamExt};
use sha2::{Digest, Sha256};

use crate::config;
use crate::error::ApiError;

/// Bytes of the SHA-256 digest kept in the entity tag
const FINGERPRINT_BYTES: usize = 16;

/// Strong entity tag for `body`: first 128 bits of SHA-256, lowercase hex, quoted
pub fn fingerprint(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    let hex: String = digest[..FINGERPRINT_BYTES]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    format!("\"{hex}\"")
}

/// `If-None-Match` value(s) of a request, joined when sent as several headers
pub fn if_none_match(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Weak comparison of an `If-None-Match` list against `etag`; `*` matches anything
pub fn if_none_match_matches(header: &str, etag: &str) -> bool {
    let target = strip_weak(etag);
    header
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .any(|tag| tag == "*" || strip_weak(tag) == target)
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

/// Fingerprint of one response and the validator the client sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalResponseState {
    pub etag: String,
    pub if_none_match: Option<String>,
}

impl ConditionalResponseState {
    pub fn new(body: &[u8], if_none_match: Option<String>) -> Self {
        Self {
            etag: fingerprint(body),
            if_none_match,
        }
    }

    pub fn is_not_modified(&self) -> bool {
        self.if_none_match
            .as_deref()
            .is_some_and(|inm| if_none_match_matches(inm, &self.etag))
    }
}

fn is_cacheable(method: &Method, response: &Response) -> bool {
    (*method == Method::GET || *method == Method::HEAD)
        && response.status().is_success()
        && !response.headers().contains_key(header::ETAG)
}

/// Response body read for fingerprinting, or handed back when too large to tag
enum BufferedBody {
    Complete(Bytes),
    Oversized(Body),
}

/// Read `body` up to `limit` bytes. A longer body comes back as a stream that
/// replays the chunks already read, followed by the rest.
async fn buffer_body(body: Body, limit: usize) -> Result<BufferedBody, axum::Error> {
    if body.size_hint().lower() > limit as u64 {
        return Ok(BufferedBody::Oversized(body));
    }

    let mut rest = body.into_data_stream();
    let mut buffered = Vec::new();
    while let Some(chunk) = rest.next().await {
        let chunk = chunk?;
        if buffered.len() + chunk.len() > limit {
            let head = stream::iter([Ok(Bytes::from(buffered)), Ok(chunk)]);
            return Ok(BufferedBody::Oversized(Body::from_stream(head.chain(rest))));
        }
        buffered.extend_from_slice(&chunk);
    }
    Ok(BufferedBody::Complete(Bytes::from(buffered)))
}

/// Attach an ETag to successful GET/HEAD responses and answer matching
/// conditional requests with an empty 304
pub async fn etag_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let api = &config::config().api;
    let method = request.method().clone();
    let client_tag = if_none_match(request.headers());

    let response = next.run(request).await;
    if !api.enable_etag || !is_cacheable(&method, &response) {
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    let buffered = buffer_body(body, api.max_etag_body_bytes).await.map_err(|e| {
        tracing::error!("Failed to buffer response body for ETag: {}", e);
        ApiError::internal_server_error("Failed to produce response body")
    })?;
    let bytes = match buffered {
        BufferedBody::Complete(bytes) => bytes,
        BufferedBody::Oversized(body) => {
            tracing::debug!("Skipping ETag for body over {} bytes", api.max_etag_body_bytes);
            return Ok(Response::from_parts(parts, body));
        }
    };

    let state = ConditionalResponseState::new(&bytes, client_tag);
    let etag = HeaderValue::from_str(&state.etag)
        .map_err(|_| ApiError::internal_server_error("Failed to encode ETag"))?;
    parts.headers.insert(header::ETAG, etag);

    if state.is_not_modified() {
        tracing::debug!("ETag {} matched; responding 304", state.etag);
        parts.status = StatusCode::NOT_MODIFIED;
        parts.headers.remove(header::CONTENT_LENGTH);
        parts.headers.remove(header::CONTENT_TYPE);
        return Ok(Response::from_parts(parts, Body::empty()));
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
