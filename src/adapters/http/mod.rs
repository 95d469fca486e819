//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.
//! [`app_router`] assembles them with the static page and the shared
//! middleware.

pub mod bazi;

pub use bazi::{bazi_router, BaziAppState};

use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use bazi::ErrorResponse;

/// Detail reported when a request handler panics.
const INTERNAL_ERROR: &str = "internal error";

/// Create the application router with all routes and middleware.
///
/// # Routes
///
/// - `GET /` - `index.html` from the configured static directory
/// - `POST /api/bazi` - Chart calculation
pub fn app_router(state: BaziAppState, config: &ServerConfig) -> Router {
    bazi_router()
        .route_service("/", ServeFile::new(config.index_path()))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// A panicking handler answers with a generic 500 instead of dropping the connection.
fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::calculation_failed(INTERNAL_ERROR)),
    )
        .into_response()
}

/// Any origin unless `cors_origins` lists some.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
