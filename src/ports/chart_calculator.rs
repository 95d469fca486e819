//! Chart Calculator Port - Local, always-available chart calculation.

use crate::domain::bazi::{ApproximateCalculator, BaziChart, BirthMoment};

/// Port for computing a chart without any external dependency.
///
/// Used as the fallback whenever the external tool yields nothing.
pub trait ChartCalculator: Send + Sync {
    fn calculate(&self, moment: &BirthMoment, gender: Option<&str>) -> BaziChart;
}

impl ChartCalculator for ApproximateCalculator {
    fn calculate(&self, moment: &BirthMoment, gender: Option<&str>) -> BaziChart {
        ApproximateCalculator::calculate(self, moment, gender)
    }
}
