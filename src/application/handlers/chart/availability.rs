//! Process-wide cache of the chart tool's availability.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::foundation::{StateMachine, ToolAvailability};
use crate::ports::RuntimeProbe;

/// Holds the settled [`ToolAvailability`] for the lifetime of the process.
///
/// The probe runs at most once under normal operation. Concurrent first
/// requests may each run it; the first result to land wins and the others
/// are discarded.
#[derive(Debug, Default)]
pub struct AvailabilityCache {
    state: AtomicU8,
}

impl AvailabilityCache {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ToolAvailability::Unchecked.as_u8()),
        }
    }

    /// A cache already settled to `Unavailable`, for when the tool is disabled.
    pub fn disabled() -> Self {
        let cache = Self::new();
        cache.settle(ToolAvailability::Unavailable);
        cache
    }

    pub fn state(&self) -> ToolAvailability {
        ToolAvailability::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Records a probe outcome if the cache is still unchecked.
    ///
    /// Returns the state in effect afterwards.
    pub fn settle(&self, outcome: ToolAvailability) -> ToolAvailability {
        if ToolAvailability::Unchecked.transition_to(outcome).is_err() {
            return self.state();
        }
        match self.state.compare_exchange(
            ToolAvailability::Unchecked.as_u8(),
            outcome.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => outcome,
            Err(existing) => ToolAvailability::from_u8(existing),
        }
    }

    /// Returns the settled state, probing first if nothing is known yet.
    pub async fn ensure_checked(&self, probe: &dyn RuntimeProbe) -> ToolAvailability {
        let current = self.state();
        if current != ToolAvailability::Unchecked {
            return current;
        }

        let outcome = match probe.probe().await {
            Ok(()) => {
                tracing::info!("Chart tool environment check passed");
                ToolAvailability::Available
            }
            Err(reason) => {
                tracing::warn!(%reason, "Chart tool unavailable; local calculation will be used");
                ToolAvailability::Unavailable
            }
        };
        self.settle(outcome)
    }
}
