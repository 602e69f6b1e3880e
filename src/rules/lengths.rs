//! Four sibling trait families -- `total_length`, `tail_length`,
//! `hind_foot_length`, `ear_length` -- each a measurement keyed by a phrase
//! in the surrounding text, a bare shorthand slot, or (total/ear length
//! only) an ambiguous single-letter abbreviation that needs a fix-up guard.
//!
//! Grounded in `traiter/traits/total_length_trait.py`,
//! `traiter/traits/tail_length_trait.py`, `traiter/traits/ear_length_trait.py`
//! and `pylib/vertnet/parsers/hind_foot_length.py`; the shorthand routes are
//! grounded in `pylib/vertnet/parsers/shorthand_length.py`.
//!
//! `value` is always reported normalized to millimeters; `units` carries the
//! *original* unit spelling detected in the source text (or `"mm"` when none
//! was written and mm is assumed), matching §8 scenario 4: `.25 in` becomes
//! `value=6.35, units=in`, not `value=0.25, units=in`.

use crate::catalog;
use crate::conversion;
use crate::engine::errors::RuleBuildError;
use crate::engine::pattern::{cap, opt, seq, tok};
use crate::engine::rule::MatchCtx;
use crate::engine::{Rule, TraitParser, keyword, producer};
use crate::regex;
use crate::shorthand::{self, Slot};
use crate::trait_model::{MeasuredFrom, Trait, TraitValue};

const LOOKBACK_FAR: usize = 40;
const LOOKBACK_NEAR: usize = 10;

fn length_value(ctx: &MatchCtx, kind: &'static str) -> Option<Trait> {
    let raw = ctx.groups.get("value")?;
    let number = conversion::to_float(raw)?;
    let t = Trait::new(kind, ctx.span, TraitValue::Number(number));
    let t = match ctx.groups.get("units").and_then(|u| conversion::convert_length_mm(number, u)) {
        Some((mm, label)) => Trait { value: TraitValue::Number(mm), ..t }.with_units(label, false),
        None => t.with_units("mm", true),
    };
    Some(t)
}

fn shorthand_value(ctx: &MatchCtx, kind: &'static str, slot: Slot) -> Option<Trait> {
    let slot_value = shorthand::shorthand_length(&ctx.groups, slot)?;
    Some(
        Trait::new(kind, ctx.span, TraitValue::Number(slot_value.value))
            .with_units("mm_shorthand", false)
            .with_estimated(slot_value.estimated),
    )
}

// ---------------------------------------------------------------------
// total_length
// ---------------------------------------------------------------------

pub fn build_total_length() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("uuid"),
        catalog::get("shorthand"),
        catalog::get("number"),
        // `feet`/`inches` declared ahead of the broader `len_units` so the
        // scanner's same-start tie-break gives the compound producer its own
        // distinct token names instead of both collapsing into `len_units`.
        catalog::get("feet"),
        catalog::get("inches"),
        catalog::get("len_units"),
        keyword(
            "total_length_key",
            regex!(r"(?i)\b(?:total\s+length|max(?:imum)?\s+length|standard\s+length|snout[\s-]vent\s+length|svl|fork\s+length|body\s+length)\b"),
        ),
        keyword("total_length_char_key", regex!(r"(?i)\b(?:tl\.?|l)\b")),
        producer(
            "total_length_keyed",
            seq(vec![tok("total_length_key"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| length_value(ctx, "total_length").map(|t| vec![t]).unwrap_or_default(),
        ),
        producer(
            "total_length_compound",
            seq(vec![
                tok("total_length_key"),
                cap("feet_value", tok("number")),
                tok("feet"),
                cap("inches_value", tok("number")),
                tok("inches"),
            ]),
            total_length_compound,
        ),
        producer(
            "total_length_ambiguous",
            seq(vec![tok("total_length_char_key"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| {
                length_value(ctx, "total_length")
                    .map(|t| vec![t.with_ambiguous_key(true)])
                    .unwrap_or_default()
            },
        ),
        producer("total_length_shorthand", cap("value", tok("shorthand")), |ctx| {
            shorthand_value(ctx, "total_length", Slot::TotalLength).map(|t| vec![t]).unwrap_or_default()
        }),
    ];
    TraitParser::build("total_length", rules).map(|p| p.with_fix_up(Box::new(total_length_fix_up)))
}

/// Converts a feet-and-inches compound measurement ("4 ft 9 in") to
/// millimeters, mirroring `body_mass`'s lb/oz compound producer.
fn total_length_compound(ctx: &MatchCtx) -> Vec<Trait> {
    let Some(feet_raw) = ctx.groups.get("feet_value") else { return Vec::new() };
    let Some(inches_raw) = ctx.groups.get("inches_value") else { return Vec::new() };
    let (Some(feet), Some(inches)) = (conversion::to_float(feet_raw), conversion::to_float(inches_raw)) else {
        return Vec::new();
    };
    let mm = crate::units::feet_inches_to_mm(feet, inches);
    vec![Trait::new("total_length", ctx.span, TraitValue::Number(mm)).with_units("ft_in", false)]
}

/// Rejects the bare `tl`/`l` route when the surrounding text reads like a
/// trap or specimen-identifier label, or a gonad measurement (`"l"` for
/// "left" is far more likely there than "length").
fn total_length_fix_up(t: &Trait, text: &str) -> Option<Trait> {
    if !t.ambiguous_key {
        return Some(t.clone());
    }
    let before_start = t.start().saturating_sub(LOOKBACK_FAR);
    let before = &text[before_start..t.start()];
    let after_end = (t.end() + LOOKBACK_NEAR).min(text.len());
    let after = &text[t.end()..after_end];
    if regex!(r"(?i)\b(?:trap|id|identifier|collector)\b").is_match(before) {
        return None;
    }
    if regex!(r"(?i)\b(?:testes|gonad|scrot)\w*\b").is_match(before) || regex!(r"(?i)\br\b").is_match(after) {
        return None;
    }
    Some(t.clone())
}

// ---------------------------------------------------------------------
// tail_length
// ---------------------------------------------------------------------

pub fn build_tail_length() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("uuid"),
        catalog::get("shorthand"),
        catalog::get("number"),
        catalog::get("len_units"),
        keyword("tail_length_key", regex!(r"(?i)\b(?:tail\s+length|tail\s+len\.?|tal\.?)\b")),
        producer(
            "tail_length_keyed",
            seq(vec![tok("tail_length_key"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| length_value(ctx, "tail_length").map(|t| vec![t]).unwrap_or_default(),
        ),
        producer("tail_length_shorthand", cap("value", tok("shorthand")), |ctx| {
            shorthand_value(ctx, "tail_length", Slot::TailLength).map(|t| vec![t]).unwrap_or_default()
        }),
    ];
    TraitParser::build("tail_length", rules)
}

// ---------------------------------------------------------------------
// hind_foot_length
// ---------------------------------------------------------------------

pub fn build_hind_foot_length() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("uuid"),
        catalog::get("shorthand"),
        catalog::get("number"),
        catalog::get("len_units"),
        keyword(
            "hind_foot_length_key",
            regex!(r"(?i)\b(?:hind\s*foot(?:\s+length)?|rear\s*foot(?:\s+length)?|hfl\.?|hf\.?)(?:\s*(?:with|w/)\s*(?P<claw>claws?))?\b"),
        ),
        producer(
            "hind_foot_length_keyed",
            seq(vec![tok("hind_foot_length_key"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| {
                let Some(mut t) = length_value(ctx, "hind_foot_length") else { return Vec::new() };
                if ctx.groups.contains("claw") {
                    t = t.with_text("with claws");
                }
                vec![t]
            },
        ),
        producer("hind_foot_length_shorthand", cap("value", tok("shorthand")), |ctx| {
            shorthand_value(ctx, "hind_foot_length", Slot::HindFootLength).map(|t| vec![t]).unwrap_or_default()
        }),
    ];
    TraitParser::build("hind_foot_length", rules)
}

// ---------------------------------------------------------------------
// ear_length
// ---------------------------------------------------------------------

pub fn build_ear_length() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("uuid"),
        catalog::get("shorthand"),
        catalog::get("number"),
        catalog::get("len_units"),
        // Declared ahead of `ear_key_plain` so the earliest-start/declaration
        // tie-break in the scanner picks the longer, more specific key when
        // both match the same starting position (e.g. "ear from notch").
        keyword(
            "ear_key_measured",
            regex!(r"(?i)\bear(?:\s+length)?\s+(?:from|measured\s+from)\s+(?P<measured_from>notch|crown)\b"),
        ),
        keyword("ear_key_plain", regex!(r"(?i)\bear(?:\s+length|\s+len\.?|\s+from\s+crown)?\b")),
        keyword("ear_char_key", regex!(r"(?i)\b(?:e|el\.?)\b")),
        producer(
            "ear_length_measured",
            seq(vec![tok("ear_key_measured"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| {
                let Some(mut t) = length_value(ctx, "ear_length") else { return Vec::new() };
                if let Some(raw) = ctx.groups.get("measured_from") {
                    let m = if raw.eq_ignore_ascii_case("crown") { MeasuredFrom::Crown } else { MeasuredFrom::Notch };
                    t = t.with_measured_from(m);
                }
                vec![t]
            },
        ),
        producer(
            "ear_length_keyed",
            seq(vec![tok("ear_key_plain"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| length_value(ctx, "ear_length").map(|t| vec![t]).unwrap_or_default(),
        ),
        producer(
            "ear_length_ambiguous",
            seq(vec![tok("ear_char_key"), cap("value", tok("number")), opt(cap("units", tok("len_units")))]),
            |ctx| {
                length_value(ctx, "ear_length")
                    .map(|t| vec![t.with_ambiguous_key(true)])
                    .unwrap_or_default()
            },
        ),
        producer("ear_length_shorthand", cap("value", tok("shorthand")), |ctx| {
            shorthand_value(ctx, "ear_length", Slot::EarLength).map(|t| vec![t]).unwrap_or_default()
        }),
    ];
    TraitParser::build("ear_length", rules).map(|p| p.with_fix_up(Box::new(ear_length_fix_up)))
}

/// Rejects the bare `e`/`el` route near specimen-identifier language or a
/// trailing compass letter (`"... E, 12 N"`), both far more likely readings
/// than "ear" for a single ambiguous letter.
fn ear_length_fix_up(t: &Trait, text: &str) -> Option<Trait> {
    if !t.ambiguous_key {
        return Some(t.clone());
    }
    let before_start = t.start().saturating_sub(LOOKBACK_NEAR);
    let before = &text[before_start..t.start()];
    let after_end = (t.end() + LOOKBACK_FAR).min(text.len());
    let after = &text[t.end()..after_end];
    if regex!(r"(?i)\b(?:identif\w*|id)\b|#").is_match(before) {
        return None;
    }
    if regex!(r"(?i)\b\d+\s*n\b").is_match(after) {
        return None;
    }
    Some(t.clone())
}

pub fn build_all() -> Result<Vec<TraitParser>, RuleBuildError> {
    Ok(vec![build_total_length()?, build_tail_length()?, build_hind_foot_length()?, build_ear_length()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_length_with_explicit_units() {
        let parser = build_total_length().unwrap();
        let traits = parser.parse("total length=180 mm; tail length=82 mm; hind foot=28");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].kind, "total_length");
        assert_eq!(traits[0].value, TraitValue::Number(180.0));
        assert_eq!(traits[0].units, Some("mm"));
        assert!(!traits[0].units_inferred);
    }

    #[test]
    fn total_length_compound_feet_and_inches_converts_to_mm() {
        let parser = build_total_length().unwrap();
        let traits = parser.parse("total length 4 ft 9 in");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].kind, "total_length");
        let expected = crate::units::feet_inches_to_mm(4.0, 9.0);
        assert_eq!(traits[0].value, TraitValue::Number(expected));
        assert_eq!(traits[0].units, Some("ft_in"));
    }

    #[test]
    fn tail_length_with_explicit_units() {
        let parser = build_tail_length().unwrap();
        let traits = parser.parse("total length=180 mm; tail length=82 mm; hind foot=28");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Number(82.0));
        assert_eq!(traits[0].units, Some("mm"));
    }

    #[test]
    fn hind_foot_length_defaults_to_inferred_mm() {
        let parser = build_hind_foot_length().unwrap();
        let traits = parser.parse("total length=180 mm; tail length=82 mm; hind foot=28");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Number(28.0));
        assert!(traits[0].units_inferred);
    }

    #[test]
    fn ear_length_measured_from_notch_converts_to_mm() {
        let parser = build_ear_length().unwrap();
        let traits = parser.parse("ear from notch=.25 in");
        assert_eq!(traits.len(), 1);
        let t = &traits[0];
        assert_eq!(t.kind, "ear_length");
        assert!((t.value.as_single().unwrap() - 6.35).abs() < 0.01);
        assert_eq!(t.units, Some("in"));
        assert_eq!(t.measured_from, Some(MeasuredFrom::Notch));
        assert_eq!(t.start(), 0);
        assert_eq!(t.end(), 21);
    }

    #[test]
    fn shorthand_four_slots_and_weight() {
        let total = build_total_length().unwrap().parse(r#"{"measurements":"192-84-31-19=38g" }"#);
        assert_eq!(total.len(), 1);
        assert_eq!(total[0].value, TraitValue::Number(192.0));
        assert_eq!(total[0].units, Some("mm_shorthand"));

        let tail = build_tail_length().unwrap().parse(r#"{"measurements":"192-84-31-19=38g" }"#);
        assert_eq!(tail[0].value, TraitValue::Number(84.0));

        let hf = build_hind_foot_length().unwrap().parse(r#"{"measurements":"192-84-31-19=38g" }"#);
        assert_eq!(hf[0].value, TraitValue::Number(31.0));

        let ear = build_ear_length().unwrap().parse(r#"{"measurements":"192-84-31-19=38g" }"#);
        assert_eq!(ear[0].value, TraitValue::Number(19.0));
    }

    #[test]
    fn ambiguous_total_length_near_trap_label_is_vetoed() {
        let parser = build_total_length().unwrap();
        assert!(parser.parse("trap tag l 123").is_empty());
    }
}
