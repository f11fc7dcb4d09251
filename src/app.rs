use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::{etag_middleware, request_id_middleware, REQUEST_ID_HEADER};
use crate::state::AppState;

/// Router with freshly seeded state and the global config
pub fn app() -> Router {
    let config = crate::config::config();
    app_with_state(AppState::new(config), config)
}

/// Middleware runs request-id → trace → etag → handler, so every response
/// (304s and errors included) carries `X-Request-Id`
pub fn app_with_state(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health))
        .merge(booking_routes())
        .merge(workspace_routes())
        .layer(middleware::from_fn(etag_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&config.security))
        .layer(Extension(state))
}

fn booking_routes() -> Router {
    use handlers::{bookings, calendar};

    Router::new()
        .route("/api/bookings", get(bookings::list))
        .route("/api/bookings/:id", get(bookings::show))
        .route("/api/calendar/:year/:month", get(calendar::month))
}

fn workspace_routes() -> Router {
    use handlers::workspace;

    Router::new()
        .route("/api/workspace/sessions", post(workspace::session_create))
        .route(
            "/api/workspace/sessions/:id",
            get(workspace::session_get).delete(workspace::session_delete),
        )
        .route("/api/workspace/sessions/:id/tabs", post(workspace::tab_open))
        .route(
            "/api/workspace/sessions/:id/tabs/:key",
            put(workspace::tab_activate).delete(workspace::tab_close),
        )
        .route("/api/workspace/sessions/:id/navigate", post(workspace::navigate))
        .route("/api/workspace/sessions/:id/location", post(workspace::location))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let exposed = [header::ETAG, REQUEST_ID_HEADER.clone()];
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive().expose_headers(exposed);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(exposed)
}
