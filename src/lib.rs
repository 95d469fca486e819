//! Bazi Chart - Four Pillars chart service
//!
//! Computes a Bazi (Four Pillars of Destiny) chart for a birth date and time,
//! delegating to an external calculation tool when one can be launched and
//! falling back to a local approximation otherwise.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
