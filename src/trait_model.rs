//! The output data model: a single flat [`Trait`] record per extracted
//! measurement or state, regardless of which trait family produced it.
//! Mirrors the `Trait` dataclass the reference parsers all converge on,
//! flattened into one Rust struct instead of a loose dict of keys so that
//! writers don't need to guess which fields a given `kind` populates.

use crate::engine::token::Range;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasuredFrom {
    Notch,
    Crown,
}

/// The numeric payload of a trait. Most producers emit `Number`; a few
/// (shorthand ranges, compound English units) emit `Pair` before the
/// writer decides how to flatten it; purely categorical traits (sex,
/// life stage, lactation state) carry no number at all and rely on
/// `value_text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitValue {
    Number(f64),
    Pair(f64, f64),
    None,
}

impl TraitValue {
    pub fn as_single(&self) -> Option<f64> {
        match self {
            TraitValue::Number(n) => Some(*n),
            TraitValue::Pair(a, _) => Some(*a),
            TraitValue::None => None,
        }
    }
}

/// One extracted trait. Every producer across every trait family builds
/// one of these; optional fields are left at their defaults when a given
/// trait kind doesn't use them (e.g. `units` is meaningless for `sex`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trait {
    pub kind: &'static str,
    pub range: Range,
    pub value: TraitValue,
    pub value_text: Option<String>,
    pub units: Option<&'static str>,
    pub units_inferred: bool,
    pub ambiguous_key: bool,
    pub estimated_value: bool,
    pub side: Option<Side>,
    pub dimension: Option<Dimension>,
    pub measured_from: Option<MeasuredFrom>,
}

impl Trait {
    pub fn new(kind: &'static str, range: Range, value: TraitValue) -> Self {
        Self {
            kind,
            range,
            value,
            value_text: None,
            units: None,
            units_inferred: false,
            ambiguous_key: false,
            estimated_value: false,
            side: None,
            dimension: None,
            measured_from: None,
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.value_text = Some(text.into());
        self
    }

    pub fn with_units(mut self, units: &'static str, inferred: bool) -> Self {
        self.units = Some(units);
        self.units_inferred = inferred;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_ambiguous_key(mut self, ambiguous: bool) -> Self {
        self.ambiguous_key = ambiguous;
        self
    }

    pub fn with_estimated(mut self, estimated: bool) -> Self {
        self.estimated_value = estimated;
        self
    }

    pub fn with_measured_from(mut self, m: MeasuredFrom) -> Self {
        self.measured_from = Some(m);
        self
    }
}
