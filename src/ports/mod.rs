//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ToolConnector` / `ToolSession` - The external chart tool process
//! - `RuntimeProbe` - Checks that the tool's runtime can be launched
//! - `ChartCalculator` - Local chart calculation used as the fallback

mod chart_calculator;
mod chart_tool;
mod runtime_probe;

pub use chart_calculator::ChartCalculator;
pub use chart_tool::{
    ContentBlock, ToolCallResult, ToolConnector, ToolDescriptor, ToolError, ToolSession,
};
pub use runtime_probe::RuntimeProbe;
