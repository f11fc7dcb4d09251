use axum::extract::{Extension, Path};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CalendarMonth;
use crate::state::AppState;

/// GET /api/calendar/:year/:month - bookings grouped by departure day
pub async fn month(
    Path((year, month)): Path<(i32, u32)>,
    Extension(state): Extension<AppState>,
) -> ApiResult<CalendarMonth> {
    Ok(ApiResponse::success(state.bookings.calendar_month(year, month)?))
}
