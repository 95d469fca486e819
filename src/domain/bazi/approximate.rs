//! Local fallback chart calculation.
//!
//! These are fixed modular formulas over the stem and branch cycles. They are
//! **not** an implementation of the traditional calendar: the year does not
//! switch at 立春, the month pillar ignores solar terms, and the day pillar
//! uses an approximate base number rather than a true sexagenary day count.
//! Lunar fields are placeholders built from the solar date. The arithmetic is
//! kept exactly as-is so repeated requests stay output-compatible.

use super::birth_moment::BirthMoment;
use super::chart::{BaziChart, FourPillars, LunarLabel, Pillar};
use super::constellation::constellation_for;
use super::cycles::{EarthlyBranch, HeavenlyStem, ZODIAC_ANIMALS};

/// Year the day-pillar base number is counted from.
const DAY_BASE_YEAR: i64 = 1900;

/// Stateless approximate calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateCalculator;

impl ApproximateCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes a complete chart for `moment`.
    ///
    /// The timezone carried by `moment` and the `gender` are accepted for
    /// parity with the delegated calculation and take no part in the result.
    pub fn calculate(&self, moment: &BirthMoment, _gender: Option<&str>) -> BaziChart {
        let pillars = Self::four_pillars(moment);
        let year = i64::from(moment.year());

        BaziChart {
            wuxing: Some(pillars.element_tally()),
            four_pillars: Some(pillars),
            zodiac: Some(ZODIAC_ANIMALS[(year - 4).rem_euclid(12) as usize].to_string()),
            constellation: Some(constellation_for(moment.month(), moment.day()).to_string()),
            lunar: Some(LunarLabel::from_parts(
                &moment.year().to_string(),
                &moment.month().to_string(),
                &moment.day().to_string(),
            )),
        }
    }

    /// Derives the four pillars.
    pub fn four_pillars(moment: &BirthMoment) -> FourPillars {
        let year = i64::from(moment.year());
        let month = i64::from(moment.month());
        let hour = i64::from(moment.hour());

        let year_stem = (year - 4).rem_euclid(10);
        let year_branch = (year - 4).rem_euclid(12);

        let month_stem = (year_stem * 2 + month - 1).rem_euclid(10);
        let month_branch = (month + 1).rem_euclid(12);

        let day_index = Self::day_base_number(year) + i64::from(moment.days_into_year());
        let day_stem = day_index.rem_euclid(10);
        let day_branch = day_index.rem_euclid(12);

        let hour_slot = (hour + 1).div_euclid(2);
        let hour_stem = (day_stem * 2 + hour_slot).rem_euclid(10);
        let hour_branch = hour_slot.rem_euclid(12);

        FourPillars {
            year: pillar(year_stem, year_branch),
            month: pillar(month_stem, month_branch),
            day: pillar(day_stem, day_branch),
            hour: pillar(hour_stem, hour_branch),
        }
    }

    /// `((year - 1900) * 365 + floor((year - 1900) / 4)) mod 60`
    fn day_base_number(year: i64) -> i64 {
        let offset = year - DAY_BASE_YEAR;
        (offset * 365 + offset.div_euclid(4)).rem_euclid(60)
    }
}

fn pillar(stem: i64, branch: i64) -> Pillar {
    Pillar::new(HeavenlyStem::from_cycle(stem), EarthlyBranch::from_cycle(branch))
}
