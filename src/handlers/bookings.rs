use axum::extract::{Extension, Path, Query};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{Booking, BookingFilter};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Departure month, `YYYY-MM`
    pub month: Option<String>,
    /// pending | approved | rejected | cancelled
    pub status: Option<String>,
}

/// GET /api/bookings - list bookings, optionally filtered
pub async fn list(
    Query(query): Query<ListQuery>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Vec<Booking>> {
    let filter = BookingFilter {
        month: query.month,
        status: query.status.as_deref().map(str::parse).transpose()?,
    };

    let bookings = state.bookings.list(&filter)?;
    tracing::debug!("Listed {} bookings", bookings.len());
    Ok(ApiResponse::success(bookings))
}

/// GET /api/bookings/:id - one booking
pub async fn show(
    Path(id): Path<String>,
    Extension(state): Extension<AppState>,
) -> ApiResult<Booking> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::invalid_field("id", format!("Invalid UUID format: {}", id)))?;
    Ok(ApiResponse::success(state.bookings.get(id)?))
}
