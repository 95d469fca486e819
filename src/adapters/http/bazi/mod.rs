//! Chart HTTP adapter - REST API for chart calculation.
//!
//! Provides `POST /api/bazi`, which answers with the chart and a one-line
//! analysis.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::BaziAppState;
pub use routes::bazi_router;
