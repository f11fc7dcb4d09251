use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;

use super::parse_session_id;
use crate::middleware::{ApiResponse, ApiResult, RequestContext};
use crate::state::AppState;
use crate::workspace::WorkspaceSnapshot;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionBody {
    /// Initial workspace URL, e.g. a shared deep link
    pub url: Option<String>,
}

/// POST /api/workspace/sessions - open a workspace session
pub async fn session_create(
    Extension(state): Extension<AppState>,
    Extension(context): Extension<RequestContext>,
    body: Option<Json<CreateSessionBody>>,
) -> ApiResult<WorkspaceSnapshot> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let snapshot = state.sessions.create(body.url.as_deref()).await?;

    tracing::debug!("Session {} created by request {}", snapshot.id, context.id);
    Ok(ApiResponse::created(snapshot))
}

/// GET /api/workspace/sessions/:id - current workspace state
pub async fn session_get(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<WorkspaceSnapshot> {
    let session = state.sessions.get(parse_session_id(&id)?).await?;
    let snapshot = session.lock().await.snapshot();
    Ok(ApiResponse::success(snapshot))
}

/// DELETE /api/workspace/sessions/:id - tear the session down
pub async fn session_delete(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<()> {
    state.sessions.remove(parse_session_id(&id)?).await?;
    Ok(ApiResponse::<()>::no_content())
}
