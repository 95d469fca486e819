//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, availability state)
//! - `bazi` - Stems, branches, elements, charts and the local calculator

pub mod bazi;
pub mod foundation;
