//! Maps whatever the chart tool returns onto the canonical [`BaziChart`].
//!
//! The tool may answer with Chinese keys (`四柱`, `五行`, `生肖`, `星座`,
//! `农历`/`農曆`) or with the canonical English keys, optionally nested under
//! `bazi`. Each output field has an ordered list of candidates, native first;
//! the first candidate whose key is present decides the field. A candidate
//! that fails to convert drops the field instead of failing the whole chart.

use serde_json::{Map, Value};

use super::chart::{BaziChart, ElementTally, FourPillars, LunarLabel, Pillar};
use super::cycles::Element;

/// Raw tool payload, classified before conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalChart {
    /// `null`, `false`, `0`, `""`, `[]` or `{}`.
    Empty(Value),
    /// An object carrying chart fields under native and/or canonical keys.
    Keyed(Map<String, Value>),
    /// A non-empty value that is not an object; nothing can be recovered.
    Opaque(Value),
}

impl ExternalChart {
    pub fn classify(raw: Value) -> Self {
        if !is_truthy(&raw) {
            return ExternalChart::Empty(raw);
        }
        match raw {
            Value::Object(mut map) => match map.remove("bazi") {
                Some(Value::Object(nested)) => ExternalChart::Keyed(nested),
                Some(other) => {
                    map.insert("bazi".to_string(), other);
                    ExternalChart::Keyed(map)
                }
                None => ExternalChart::Keyed(map),
            },
            other => ExternalChart::Opaque(other),
        }
    }

    /// Converts into the canonical shape.
    pub fn into_canonical(self) -> Normalized {
        match self {
            ExternalChart::Empty(raw) => Normalized::Empty(raw),
            ExternalChart::Keyed(map) => Normalized::Chart(fold_fields(&map)),
            ExternalChart::Opaque(_) => Normalized::Chart(BaziChart::default()),
        }
    }
}

/// Outcome of normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The empty input, handed back untouched.
    Empty(Value),
    /// The canonical chart; may itself be empty if nothing was recognized.
    Chart(BaziChart),
}

impl Normalized {
    /// The chart, if at least one field was recovered.
    pub fn into_chart(self) -> Option<BaziChart> {
        match self {
            Normalized::Chart(chart) if !chart.is_empty() => Some(chart),
            _ => None,
        }
    }
}

/// Normalizes a raw tool payload.
pub fn normalize(raw: Value) -> Normalized {
    ExternalChart::classify(raw).into_canonical()
}

// ════════════════════════════════════════════════════════════════════════════
// Field table
// ════════════════════════════════════════════════════════════════════════════

/// A converted value for one output field.
enum FieldValue {
    Pillars(FourPillars),
    Tally(ElementTally),
    Zodiac(String),
    Constellation(String),
    Lunar(LunarLabel),
}

impl FieldValue {
    fn apply(self, chart: &mut BaziChart) {
        match self {
            FieldValue::Pillars(p) => chart.four_pillars = Some(p),
            FieldValue::Tally(t) => chart.wuxing = Some(t),
            FieldValue::Zodiac(z) => chart.zodiac = Some(z),
            FieldValue::Constellation(c) => chart.constellation = Some(c),
            FieldValue::Lunar(l) => chart.lunar = Some(l),
        }
    }
}

/// Keys that may carry a field, with the conversion for their value.
///
/// With several keys, the first truthy value wins, else the first present.
struct Candidate {
    keys: &'static [&'static str],
    convert: fn(&Value) -> Option<FieldValue>,
}

impl Candidate {
    fn lookup<'a>(&self, map: &'a Map<String, Value>) -> Option<&'a Value> {
        let present = move || self.keys.iter().filter_map(move |k| map.get(*k));
        present().find(|v| is_truthy(v)).or_else(|| present().next())
    }
}

struct Field {
    name: &'static str,
    candidates: &'static [Candidate],
}

const FIELDS: &[Field] = &[
    Field {
        name: "fourPillars",
        candidates: &[
            Candidate { keys: &["四柱"], convert: native_pillars },
            Candidate { keys: &["fourPillars"], convert: canonical_pillars },
        ],
    },
    Field {
        name: "wuxing",
        candidates: &[
            Candidate { keys: &["五行"], convert: native_tally },
            Candidate { keys: &["wuxing"], convert: canonical_tally },
        ],
    },
    Field {
        name: "zodiac",
        candidates: &[
            Candidate { keys: &["生肖"], convert: zodiac },
            Candidate { keys: &["zodiac"], convert: zodiac },
        ],
    },
    Field {
        name: "constellation",
        candidates: &[
            Candidate { keys: &["星座"], convert: constellation },
            Candidate { keys: &["constellation"], convert: constellation },
        ],
    },
    Field {
        name: "lunar",
        candidates: &[
            Candidate { keys: &["农历", "農曆"], convert: native_lunar },
            Candidate { keys: &["lunar"], convert: canonical_lunar },
        ],
    },
];

fn fold_fields(map: &Map<String, Value>) -> BaziChart {
    FIELDS.iter().fold(BaziChart::default(), |mut chart, field| {
        let hit = field
            .candidates
            .iter()
            .find_map(|c| c.lookup(map).map(|value| (c, value)));

        if let Some((candidate, value)) = hit {
            match (candidate.convert)(value) {
                Some(converted) => converted.apply(&mut chart),
                None => tracing::debug!(
                    field = field.name,
                    key = candidate.keys[0],
                    "Dropping malformed chart field from tool response"
                ),
            }
        }
        chart
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Conversions
// ════════════════════════════════════════════════════════════════════════════

/// Native pillar names; the hour pillar has traditional and simplified forms.
const NATIVE_YEAR: &[&str] = &["年柱"];
const NATIVE_MONTH: &[&str] = &["月柱"];
const NATIVE_DAY: &[&str] = &["日柱"];
const NATIVE_HOUR: &[&str] = &["時柱", "时柱"];

fn native_pillars(value: &Value) -> Option<FieldValue> {
    let pillars = value.as_object()?;
    let slot = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| pillars.get(*k))
            .and_then(Value::as_str)
            .and_then(Pillar::from_glyphs)
    };
    Some(FieldValue::Pillars(FourPillars {
        year: slot(NATIVE_YEAR)?,
        month: slot(NATIVE_MONTH)?,
        day: slot(NATIVE_DAY)?,
        hour: slot(NATIVE_HOUR)?,
    }))
}

fn canonical_pillars(value: &Value) -> Option<FieldValue> {
    serde_json::from_value(value.clone()).ok().map(FieldValue::Pillars)
}

/// `None` unless at least one element glyph carries a count.
fn native_tally(value: &Value) -> Option<FieldValue> {
    let counts = value.as_object()?;
    let mut tally = ElementTally::default();
    let mut seen = false;
    for (glyph, count) in counts {
        if let (Some(element), Some(count)) = (Element::from_glyph(glyph), as_count(count)) {
            tally.set(element, count);
            seen = true;
        }
    }
    seen.then_some(FieldValue::Tally(tally))
}

fn canonical_tally(value: &Value) -> Option<FieldValue> {
    value
        .as_object()
        .filter(|o| !o.is_empty())
        .and_then(|_| serde_json::from_value(value.clone()).ok())
        .map(FieldValue::Tally)
}

fn zodiac(value: &Value) -> Option<FieldValue> {
    value.as_str().map(|s| FieldValue::Zodiac(s.to_string()))
}

fn constellation(value: &Value) -> Option<FieldValue> {
    value.as_str().map(|s| FieldValue::Constellation(s.to_string()))
}

fn native_lunar(value: &Value) -> Option<FieldValue> {
    let lunar = value.as_object().filter(|o| !o.is_empty())?;
    let part = |keys: [&str; 2]| {
        keys.iter()
            .filter_map(|k| lunar.get(*k))
            .find(|v| is_truthy(v))
            .map(render)
            .unwrap_or_default()
    };
    Some(FieldValue::Lunar(LunarLabel::from_parts(
        &part(["农历年", "農曆年"]),
        &part(["农历月", "農曆月"]),
        &part(["农历日", "農曆日"]),
    )))
}

fn canonical_lunar(value: &Value) -> Option<FieldValue> {
    serde_json::from_value(value.clone()).ok().map(FieldValue::Lunar)
}

/// Non-negative integral count, accepting `3` and `3.0`.
fn as_count(value: &Value) -> Option<u32> {
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
        .and_then(|n| u32::try_from(n).ok())
}

/// Display form of a lunar component.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// JSON truthiness: empty containers, empty strings, zero, `false` and `null` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
