//! One-line chart summary: the strongest element(s) and the day master.

use super::chart::BaziChart;

/// Returned when there is no chart to describe.
pub const ANALYSIS_FAILED: &str = "分析失敗";

/// Returned when the chart has no element tally.
pub const INSUFFICIENT_DATA: &str = "數據不足";

/// Shown in place of the day master when the chart lacks pillars.
const UNKNOWN_DAY_MASTER: &str = "未知";

/// Builds the summary line for `chart`.
///
/// Tied elements are listed in canonical order (金, 木, 水, 火, 土) and joined
/// with `、`.
pub fn summarize(chart: &BaziChart) -> String {
    if chart.is_empty() {
        return ANALYSIS_FAILED.to_string();
    }

    let Some(tally) = chart.wuxing else {
        return INSUFFICIENT_DATA.to_string();
    };

    let elements = tally
        .strongest()
        .iter()
        .map(|e| e.glyph().to_string())
        .collect::<Vec<_>>()
        .join("、");

    let day_master = chart
        .four_pillars
        .map(|p| p.day_master().to_string())
        .unwrap_or_else(|| UNKNOWN_DAY_MASTER.to_string());

    format!("五行最強旺的是：{elements}。您的日主是 {day_master}。")
}
