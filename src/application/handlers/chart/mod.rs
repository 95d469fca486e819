//! Chart handlers.
//!
//! Computes a chart through the external tool when it is available, otherwise
//! with the local approximate calculator.

mod availability;
mod calculate_chart;

pub use availability::AvailabilityCache;
pub use calculate_chart::{
    select_tool, CalculateChartCommand, CalculateChartHandler, CalculateChartResult, ChartSource,
    DEFAULT_TOOL_NAME,
};
