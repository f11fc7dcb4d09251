use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, RequestContext};
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Booking API (Rust)",
            "version": version,
            "description": "Travel booking API with workspace navigation state",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health",
                "bookings": "/api/bookings[/:id]",
                "calendar": "/api/calendar/:year/:month",
                "workspace": "/api/workspace/sessions[/:id[/tabs[/:key]|/navigate|/location]]",
            }
        }
    }))
}

/// GET /health - liveness
pub async fn health(
    Extension(state): Extension<AppState>,
    Extension(context): Extension<RequestContext>,
) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "requestId": context.id,
        "workspaceSessions": state.sessions.len().await,
    })))
}
