//! HTTP handlers for the chart endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::chart::{CalculateChartCommand, CalculateChartHandler};
use crate::domain::bazi::BirthMoment;

use super::dto::{ChartRequest, ChartResponse, ErrorResponse};

/// Application state for the chart endpoint.
#[derive(Clone)]
pub struct BaziAppState {
    pub chart_handler: Arc<CalculateChartHandler>,
}

impl BaziAppState {
    pub fn new(chart_handler: Arc<CalculateChartHandler>) -> Self {
        Self { chart_handler }
    }
}

/// Compute a chart.
///
/// POST /api/bazi
pub async fn calculate_bazi(
    State(state): State<BaziAppState>,
    body: Result<Json<ChartRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected chart request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response();
        }
    };

    let Some((date, time)) = request.birth_fields() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::missing_birth_fields()),
        )
            .into_response();
    };

    let moment = match BirthMoment::parse(&date, &time, request.timezone_or_default()) {
        Ok(moment) => moment,
        Err(e) => {
            tracing::error!(error = %e, birth_date = %date, birth_time = %time, "Chart calculation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::calculation_failed(&e)),
            )
                .into_response();
        }
    };

    let result = state
        .chart_handler
        .handle(CalculateChartCommand {
            moment,
            gender: request.gender.clone(),
        })
        .await;
    tracing::info!(source = %result.source, "Chart calculated");

    let response = ChartResponse {
        name: request.name.unwrap_or_default(),
        gender: request.gender.unwrap_or_default(),
        bazi: result.chart,
        analysis: result.analysis,
    };
    (StatusCode::OK, Json(response)).into_response()
}
