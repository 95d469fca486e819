//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through the ports.

pub mod chart;

pub use chart::{
    AvailabilityCache, CalculateChartCommand, CalculateChartHandler, CalculateChartResult,
    ChartSource,
};
