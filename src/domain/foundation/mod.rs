//! Foundation module - Shared domain primitives.
//!
//! Contains the error types and state vocabulary shared across the
//! chart domain.

mod errors;
mod state_machine;
mod tool_availability;

pub use errors::ValidationError;
pub use state_machine::StateMachine;
pub use tool_availability::ToolAvailability;
