//! The fixed cycles a chart is built from: Heavenly Stems, Earthly Branches,
//! the Five Elements and the twelve zodiac animals.
//!
//! Stems and branches serialize as their single Chinese character, which is
//! also the form the external calculation tool reports them in.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the ten Heavenly Stems (天干), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    /// All stems in cycle order; index 0 is 甲.
    pub const ALL: [HeavenlyStem; 10] = [
        HeavenlyStem::Jia,
        HeavenlyStem::Yi,
        HeavenlyStem::Bing,
        HeavenlyStem::Ding,
        HeavenlyStem::Wu,
        HeavenlyStem::Ji,
        HeavenlyStem::Geng,
        HeavenlyStem::Xin,
        HeavenlyStem::Ren,
        HeavenlyStem::Gui,
    ];

    /// Returns the stem at `index` in the cycle, wrapping in both directions.
    pub fn from_cycle(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }

    pub fn glyph(&self) -> char {
        match self {
            HeavenlyStem::Jia => '甲',
            HeavenlyStem::Yi => '乙',
            HeavenlyStem::Bing => '丙',
            HeavenlyStem::Ding => '丁',
            HeavenlyStem::Wu => '戊',
            HeavenlyStem::Ji => '己',
            HeavenlyStem::Geng => '庚',
            HeavenlyStem::Xin => '辛',
            HeavenlyStem::Ren => '壬',
            HeavenlyStem::Gui => '癸',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.glyph() == glyph)
    }

    /// The element this stem belongs to.
    pub fn element(&self) -> Element {
        match self {
            HeavenlyStem::Jia | HeavenlyStem::Yi => Element::Wood,
            HeavenlyStem::Bing | HeavenlyStem::Ding => Element::Fire,
            HeavenlyStem::Wu | HeavenlyStem::Ji => Element::Earth,
            HeavenlyStem::Geng | HeavenlyStem::Xin => Element::Metal,
            HeavenlyStem::Ren | HeavenlyStem::Gui => Element::Water,
        }
    }
}

/// One of the twelve Earthly Branches (地支), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl EarthlyBranch {
    /// All branches in cycle order; index 0 is 子.
    pub const ALL: [EarthlyBranch; 12] = [
        EarthlyBranch::Zi,
        EarthlyBranch::Chou,
        EarthlyBranch::Yin,
        EarthlyBranch::Mao,
        EarthlyBranch::Chen,
        EarthlyBranch::Si,
        EarthlyBranch::Wu,
        EarthlyBranch::Wei,
        EarthlyBranch::Shen,
        EarthlyBranch::You,
        EarthlyBranch::Xu,
        EarthlyBranch::Hai,
    ];

    /// Returns the branch at `index` in the cycle, wrapping in both directions.
    pub fn from_cycle(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    pub fn glyph(&self) -> char {
        match self {
            EarthlyBranch::Zi => '子',
            EarthlyBranch::Chou => '丑',
            EarthlyBranch::Yin => '寅',
            EarthlyBranch::Mao => '卯',
            EarthlyBranch::Chen => '辰',
            EarthlyBranch::Si => '巳',
            EarthlyBranch::Wu => '午',
            EarthlyBranch::Wei => '未',
            EarthlyBranch::Shen => '申',
            EarthlyBranch::You => '酉',
            EarthlyBranch::Xu => '戌',
            EarthlyBranch::Hai => '亥',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.glyph() == glyph)
    }

    /// The element this branch belongs to.
    pub fn element(&self) -> Element {
        match self {
            EarthlyBranch::Yin | EarthlyBranch::Mao => Element::Wood,
            EarthlyBranch::Si | EarthlyBranch::Wu => Element::Fire,
            EarthlyBranch::Chou | EarthlyBranch::Chen | EarthlyBranch::Wei | EarthlyBranch::Xu => {
                Element::Earth
            }
            EarthlyBranch::Shen | EarthlyBranch::You => Element::Metal,
            EarthlyBranch::Zi | EarthlyBranch::Hai => Element::Water,
        }
    }
}

/// The Five Elements (五行).
///
/// Declaration order is the canonical order used for tallies and for listing
/// tied elements in summaries: metal, wood, water, fire, earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Metal,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];

    /// Chinese display character.
    pub fn glyph(&self) -> char {
        match self {
            Element::Metal => '金',
            Element::Wood => '木',
            Element::Water => '水',
            Element::Fire => '火',
            Element::Earth => '土',
        }
    }

    pub fn from_glyph(glyph: &str) -> Option<Self> {
        let mut chars = glyph.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::ALL.into_iter().find(|e| e.glyph() == c),
            _ => None,
        }
    }
}

/// Zodiac animals (生肖), indexed by the year branch.
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龍", "蛇", "馬", "羊", "猴", "雞", "狗", "豬",
];

impl fmt::Display for HeavenlyStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl fmt::Display for EarthlyBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

// Serde: stems and branches travel as their single character.

impl Serialize for HeavenlyStem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HeavenlyStem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        single_char(&raw)
            .and_then(HeavenlyStem::from_glyph)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown heavenly stem: {raw}")))
    }
}

impl Serialize for EarthlyBranch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EarthlyBranch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        single_char(&raw)
            .and_then(EarthlyBranch::from_glyph)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown earthly branch: {raw}")))
    }
}

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_cycle_wraps_both_directions() {
        assert_eq!(HeavenlyStem::from_cycle(0), HeavenlyStem::Jia);
        assert_eq!(HeavenlyStem::from_cycle(10), HeavenlyStem::Jia);
        assert_eq!(HeavenlyStem::from_cycle(-1), HeavenlyStem::Gui);
        assert_eq!(HeavenlyStem::from_cycle(2020), HeavenlyStem::Jia);
    }

    #[test]
    fn branch_cycle_wraps_both_directions() {
        assert_eq!(EarthlyBranch::from_cycle(4), EarthlyBranch::Chen);
        assert_eq!(EarthlyBranch::from_cycle(12), EarthlyBranch::Zi);
        assert_eq!(EarthlyBranch::from_cycle(-1), EarthlyBranch::Hai);
    }

    #[test]
    fn glyphs_round_trip_through_lookup() {
        for stem in HeavenlyStem::ALL {
            assert_eq!(HeavenlyStem::from_glyph(stem.glyph()), Some(stem));
        }
        for branch in EarthlyBranch::ALL {
            assert_eq!(EarthlyBranch::from_glyph(branch.glyph()), Some(branch));
        }
        assert_eq!(HeavenlyStem::from_glyph('子'), None);
    }

    #[test]
    fn element_table_matches_traditional_assignment() {
        assert_eq!(HeavenlyStem::Jia.element(), Element::Wood);
        assert_eq!(HeavenlyStem::Ding.element(), Element::Fire);
        assert_eq!(HeavenlyStem::Ji.element(), Element::Earth);
        assert_eq!(HeavenlyStem::Xin.element(), Element::Metal);
        assert_eq!(HeavenlyStem::Gui.element(), Element::Water);
        assert_eq!(EarthlyBranch::Chou.element(), Element::Earth);
        assert_eq!(EarthlyBranch::Xu.element(), Element::Earth);
        assert_eq!(EarthlyBranch::Si.element(), Element::Fire);
        assert_eq!(EarthlyBranch::Shen.element(), Element::Metal);
        assert_eq!(EarthlyBranch::Hai.element(), Element::Water);
        assert_eq!(EarthlyBranch::Mao.element(), Element::Wood);
    }

    #[test]
    fn element_glyph_lookup() {
        assert_eq!(Element::from_glyph("土"), Some(Element::Earth));
        assert_eq!(Element::from_glyph("土土"), None);
        assert_eq!(Element::Water.glyph(), '水');
    }

    #[test]
    fn stem_serializes_as_character() {
        let json = serde_json::to_string(&HeavenlyStem::Geng).unwrap();
        assert_eq!(json, "\"庚\"");
        let back: EarthlyBranch = serde_json::from_str("\"酉\"").unwrap();
        assert_eq!(back, EarthlyBranch::You);
    }

    #[test]
    fn unknown_glyph_fails_to_deserialize() {
        assert!(serde_json::from_str::<HeavenlyStem>("\"X\"").is_err());
        assert!(serde_json::from_str::<EarthlyBranch>("\"子丑\"").is_err());
    }
}
