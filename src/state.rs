use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::BookingService;
use crate::workspace::SessionRegistry;

/// Shared handler state, injected as an `Extension`
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bookings: Arc::new(BookingService::seeded()),
            sessions: SessionRegistry::new(config.workspace.clone()),
        }
    }
}
