//! Canonical chart shape returned to callers.
//!
//! Every producer (the external calculation tool via the normalizer, or the
//! local fallback) converges on [`BaziChart`]. Fields are optional because the
//! external tool may only report a subset; absent fields are omitted from the
//! serialized form.

use serde::{Deserialize, Serialize};

use super::cycles::{EarthlyBranch, Element, HeavenlyStem};

/// A stem/branch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
}

impl Pillar {
    pub fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Self {
        Self { stem, branch }
    }

    /// Parses a two-character pillar such as `"甲辰"`.
    ///
    /// Characters beyond the second are ignored.
    pub fn from_glyphs(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let stem = HeavenlyStem::from_glyph(chars.next()?)?;
        let branch = EarthlyBranch::from_glyph(chars.next()?)?;
        Some(Self { stem, branch })
    }

    /// The two elements this pillar contributes to a tally.
    pub fn elements(&self) -> [Element; 2] {
        [self.stem.element(), self.branch.element()]
    }
}

/// Year, month, day and hour pillars. All four are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn iter(&self) -> impl Iterator<Item = &Pillar> {
        [&self.year, &self.month, &self.day, &self.hour].into_iter()
    }

    /// The day master: stem of the day pillar.
    pub fn day_master(&self) -> HeavenlyStem {
        self.day.stem
    }

    /// Counts the elements of all eight characters.
    pub fn element_tally(&self) -> ElementTally {
        let mut tally = ElementTally::default();
        for element in self.iter().flat_map(Pillar::elements) {
            tally.add(element);
        }
        tally
    }
}

/// Element counts keyed by canonical short code (`jin`, `mu`, `shui`, `huo`, `tu`).
///
/// Missing keys deserialize as zero; unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTally {
    #[serde(default)]
    pub jin: u32,
    #[serde(default)]
    pub mu: u32,
    #[serde(default)]
    pub shui: u32,
    #[serde(default)]
    pub huo: u32,
    #[serde(default)]
    pub tu: u32,
}

impl ElementTally {
    pub fn count(&self, element: Element) -> u32 {
        match element {
            Element::Metal => self.jin,
            Element::Wood => self.mu,
            Element::Water => self.shui,
            Element::Fire => self.huo,
            Element::Earth => self.tu,
        }
    }

    fn slot(&mut self, element: Element) -> &mut u32 {
        match element {
            Element::Metal => &mut self.jin,
            Element::Wood => &mut self.mu,
            Element::Water => &mut self.shui,
            Element::Fire => &mut self.huo,
            Element::Earth => &mut self.tu,
        }
    }

    pub fn add(&mut self, element: Element) {
        *self.slot(element) += 1;
    }

    pub fn set(&mut self, element: Element, count: u32) {
        *self.slot(element) = count;
    }

    /// All elements tied at the highest count, in canonical order.
    ///
    /// An all-zero tally ties every element.
    pub fn strongest(&self) -> Vec<Element> {
        let max = Element::ALL.iter().map(|e| self.count(*e)).max().unwrap_or(0);
        Element::ALL
            .into_iter()
            .filter(|e| self.count(*e) == max)
            .collect()
    }
}

/// Lunar-calendar display strings, e.g. `{"year": "2024年", "date": "1月1日"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarLabel {
    pub year: String,
    pub date: String,
}

impl LunarLabel {
    /// Builds the display strings from already rendered components.
    pub fn from_parts(year: &str, month: &str, day: &str) -> Self {
        Self {
            year: format!("{year}年"),
            date: format!("{month}月{day}日"),
        }
    }
}

/// The canonical chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaziChart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub four_pillars: Option<FourPillars>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wuxing: Option<ElementTally>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zodiac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunar: Option<LunarLabel>,
}

impl BaziChart {
    /// True when no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.four_pillars.is_none()
            && self.wuxing.is_none()
            && self.zodiac.is_none()
            && self.constellation.is_none()
            && self.lunar.is_none()
    }
}
