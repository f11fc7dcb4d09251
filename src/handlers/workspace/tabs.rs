use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;

use super::parse_session_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::workspace::NavigationResult;

#[derive(Debug, Deserialize)]
pub struct OpenTabBody {
    pub key: String,
}

/// POST /api/workspace/sessions/:id/tabs - open (or focus) a tab
pub async fn tab_open(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
    Json(body): Json<OpenTabBody>,
) -> ApiResult<NavigationResult> {
    let session = state.sessions.get(parse_session_id(&id)?).await?;
    let mut session = session.lock().await;

    let pushed = session.open_tab(&body.key)?;
    Ok(ApiResponse::created(NavigationResult {
        pushed,
        workspace: session.snapshot(),
    }))
}

/// PUT /api/workspace/sessions/:id/tabs/:key - focus a tab
pub async fn tab_activate(
    Path((id, key)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
) -> ApiResult<NavigationResult> {
    let session = state.sessions.get(parse_session_id(&id)?).await?;
    let mut session = session.lock().await;

    let pushed = session.activate_tab(&key)?;
    Ok(ApiResponse::success(NavigationResult {
        pushed,
        workspace: session.snapshot(),
    }))
}

/// DELETE /api/workspace/sessions/:id/tabs/:key - close a tab
pub async fn tab_close(
    Path((id, key)): Path<(String, String)>,
    Extension(state): Extension<AppState>,
) -> ApiResult<NavigationResult> {
    let session = state.sessions.get(parse_session_id(&id)?).await?;
    let mut session = session.lock().await;

    let pushed = session.close_tab(&key)?;
    Ok(ApiResponse::success(NavigationResult {
        pushed,
        workspace: session.snapshot(),
    }))
}
