use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;

use super::parse_session_id;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::workspace::{ContentType, NavigationResult, UnknownContentType};

#[derive(Debug, Deserialize)]
pub struct NavigateBody {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationBody {
    pub url: String,
}

/// POST /api/workspace/sessions/:id/navigate - switch the active panel
pub async fn navigate(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(body): Json<NavigateBody>,
) -> ApiResult<NavigationResult> {
    let content: ContentType = body
        .content
        .parse()
        .map_err(|e: UnknownContentType| ApiError::invalid_field("content", e.to_string()))?;

    let session = state.sessions.get(parse_session_id(&id)?).await?;
    let mut session = session.lock().await;

    let pushed = session.navigate(content);
    Ok(ApiResponse::success(NavigationResult {
        pushed,
        workspace: session.snapshot(),
    }))
}

/// POST /api/workspace/sessions/:id/location - report a URL change (back/forward, pasted link)
pub async fn location(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(body): Json<LocationBody>,
) -> ApiResult<NavigationResult> {
    let session = state.sessions.get(parse_session_id(&id)?).await?;
    let mut session = session.lock().await;

    if let Some(content) = session.observe_location(&body.url) {
        tracing::debug!("Location change applied {} to the active tab", content);
    }
    Ok(ApiResponse::success(NavigationResult {
        pushed: None,
        workspace: session.snapshot(),
    }))
}
