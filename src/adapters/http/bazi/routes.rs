//! Axum router configuration for the chart endpoint.

use axum::{routing::post, Router};

use super::handlers::{calculate_bazi, BaziAppState};

/// Create the chart API router.
///
/// # Routes
///
/// - `POST /api/bazi` - Compute a chart from a birth date and time
pub fn bazi_router() -> Router<BaziAppState> {
    Router::new().route("/api/bazi", post(calculate_bazi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::handlers::chart::{AvailabilityCache, CalculateChartHandler};
    use crate::domain::bazi::ApproximateCalculator;
    use crate::ports::{RuntimeProbe, ToolConnector, ToolError, ToolSession};

    struct NoTool;

    #[async_trait]
    impl ToolConnector for NoTool {
        async fn connect(&self) -> Result<Box<dyn ToolSession>, ToolError> {
            Err(ToolError::Launch("not installed".to_string()))
        }
    }

    #[async_trait]
    impl RuntimeProbe for NoTool {
        async fn probe(&self) -> Result<(), String> {
            Err("not installed".to_string())
        }
    }

    fn app() -> Router {
        let handler = CalculateChartHandler::new(
            Arc::new(NoTool),
            Arc::new(NoTool),
            Arc::new(AvailabilityCache::new()),
            Arc::new(ApproximateCalculator::new()),
        );
        bazi_router().with_state(BaziAppState::new(Arc::new(handler)))
    }

    async fn post_json(body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bazi")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn computes_fallback_chart() {
        let (status, body) = post_json(
            r#"{"birthDate":"2024-01-01","birthTime":"12:00","gender":"male","name":"小明"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "小明");
        assert_eq!(body["gender"], "male");
        assert_eq!(body["bazi"]["fourPillars"]["year"], json!({"stem": "甲", "branch": "辰"}));
        assert_eq!(body["analysis"], "五行最強旺的是：木。您的日主是 乙。");
    }

    #[tokio::test]
    async fn name_and_gender_default_to_empty() {
        let (status, body) = post_json(r#"{"birthDate":"2024-01-01","birthTime":"12:00"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "");
        assert_eq!(body["gender"], "");
    }

    #[tokio::test]
    async fn missing_birth_time_is_bad_request() {
        let (status, body) = post_json(r#"{"birthDate":"2024-01-01"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "請提供出生日期和時間");
    }

    #[tokio::test]
    async fn empty_birth_date_is_bad_request() {
        let (status, body) = post_json(r#"{"birthDate":"","birthTime":"12:00"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "請提供出生日期和時間");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = post_json("[1, 2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparseable_date_is_server_error() {
        let (status, body) = post_json(r#"{"birthDate":"2024-13-45","birthTime":"12:00"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("計算失敗"));
    }
}
