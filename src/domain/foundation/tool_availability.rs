//! Availability of the external calculation tool.

use super::StateMachine;

/// Whether the external calculation tool can be used.
///
/// Starts `Unchecked` and settles exactly once, after the first probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolAvailability {
    #[default]
    Unchecked,
    Available,
    Unavailable,
}

impl ToolAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, ToolAvailability::Available)
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            ToolAvailability::Unchecked => 0,
            ToolAvailability::Available => 1,
            ToolAvailability::Unavailable => 2,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ToolAvailability::Available,
            2 => ToolAvailability::Unavailable,
            _ => ToolAvailability::Unchecked,
        }
    }
}

impl StateMachine for ToolAvailability {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ToolAvailability::*;
        matches!((self, target), (Unchecked, Available) | (Unchecked, Unavailable))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ToolAvailability::*;
        match self {
            Unchecked => vec![Available, Unavailable],
            Available | Unavailable => vec![],
        }
    }
}
