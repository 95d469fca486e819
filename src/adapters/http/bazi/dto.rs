//! HTTP DTOs for the chart endpoint.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::bazi::BaziChart;

/// Timezone assumed when the request names none.
pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";

/// Error shown when the birth date or time is missing.
pub const MISSING_BIRTH_FIELDS: &str = "請提供出生日期和時間";

/// Prefix of the error shown when calculation fails.
pub const CALCULATION_FAILED: &str = "計算失敗";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to compute a chart.
///
/// The birth fields accept any JSON value. A non-string value is rendered as
/// JSON text and left for date parsing to reject.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    #[serde(default)]
    pub birth_date: Option<Value>,
    #[serde(default)]
    pub birth_time: Option<Value>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ChartRequest {
    /// Birth date and time, if both are present and non-empty.
    pub fn birth_fields(&self) -> Option<(String, String)> {
        let date = birth_field(self.birth_date.as_ref())?;
        let time = birth_field(self.birth_time.as_ref())?;
        Some((date, time))
    }

    pub fn timezone_or_default(&self) -> &str {
        self.timezone
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE)
    }
}

/// Text of a birth field; `null`, `false`, zero and empty values count as missing.
fn birth_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Computed chart with its one-line analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ChartResponse {
    pub name: String,
    pub gender: String,
    pub bazi: BaziChart,
    pub analysis: String,
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn missing_birth_fields() -> Self {
        Self {
            error: MISSING_BIRTH_FIELDS.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    pub fn calculation_failed(detail: impl std::fmt::Display) -> Self {
        Self {
            error: format!("{CALCULATION_FAILED}: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_request_deserializes_camel_case() {
        let json = r#"{"birthDate": "2024-01-01", "birthTime": "12:00", "gender": "male"}"#;
        let req: ChartRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req.birth_fields(),
            Some(("2024-01-01".to_string(), "12:00".to_string()))
        );
        assert_eq!(req.gender.as_deref(), Some("male"));
        assert_eq!(req.timezone_or_default(), DEFAULT_TIMEZONE);
        assert!(req.name.is_none());
    }

    #[test]
    fn empty_birth_fields_count_as_missing() {
        let req = ChartRequest {
            birth_date: Some(Value::from("2024-01-01")),
            birth_time: Some(Value::from("")),
            ..Default::default()
        };
        assert_eq!(req.birth_fields(), None);
        assert_eq!(ChartRequest::default().birth_fields(), None);
    }

    #[test]
    fn falsy_birth_values_count_as_missing() {
        for falsy in [json!(null), json!(false), json!(0), json!([]), json!({})] {
            let req = ChartRequest {
                birth_date: Some(falsy),
                birth_time: Some(json!("12:00")),
                ..Default::default()
            };
            assert_eq!(req.birth_fields(), None);
        }
    }

    #[test]
    fn non_string_birth_values_are_rendered() {
        let req: ChartRequest =
            serde_json::from_value(json!({"birthDate": 20240101, "birthTime": ["12:00"]})).unwrap();
        assert_eq!(
            req.birth_fields(),
            Some(("20240101".to_string(), r#"["12:00"]"#.to_string()))
        );
    }

    #[test]
    fn explicit_timezone_is_kept() {
        let req = ChartRequest {
            timezone: Some("Asia/Shanghai".to_string()),
            ..Default::default()
        };
        assert_eq!(req.timezone_or_default(), "Asia/Shanghai");
    }

    #[test]
    fn calculation_failed_carries_detail() {
        let error = ErrorResponse::calculation_failed("bad date");
        assert_eq!(error.error, "計算失敗: bad date");
    }
}
