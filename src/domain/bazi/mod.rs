//! Bazi module - Four Pillars chart types and pure calculation services.
//!
//! # Components
//!
//! - `cycles` - Heavenly Stems, Earthly Branches, Five Elements, zodiac animals
//! - `chart` - The canonical chart shape every producer converges on
//! - `birth_moment` - Parsed birth date/time value object
//! - `constellation` - Western zodiac sign lookup
//! - `normalizer` - Maps external tool payloads onto the canonical chart
//! - `approximate` - Local fallback calculator (non-authoritative formulas)
//! - `summary` - One-line dominant element / day master summary
//!
//! Everything here is pure and synchronous. Delegation to the external
//! calculation tool lives behind the ports.

mod approximate;
mod birth_moment;
mod chart;
mod constellation;
mod cycles;
mod normalizer;
mod summary;

pub use approximate::ApproximateCalculator;
pub use birth_moment::BirthMoment;
pub use chart::{BaziChart, ElementTally, FourPillars, LunarLabel, Pillar};
pub use constellation::{constellation_for, sign_names};
pub use cycles::{EarthlyBranch, Element, HeavenlyStem, ZODIAC_ANIMALS};
pub use normalizer::{normalize, ExternalChart, Normalized};
pub use summary::{summarize, ANALYSIS_FAILED, INSUFFICIENT_DATA};
