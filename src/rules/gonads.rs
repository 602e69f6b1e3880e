//! Gonad trait families: `testes_state`, `testes_size`, `ovaries_state`,
//! `ovaries_size`, and a sex-agnostic `gonads_state` fallback for records
//! that just say "gonads" without committing to a sex.
//!
//! Grounded in `pylib/trait_builders/testes_state_trait_builder.py`,
//! `pylib/vertnet/parsers/ovaries_size.py` and
//! `pylib/parsers/ovaries_state.py`. Size producers implement the
//! side-paired "double" shape: an optional `side` marker ahead of the key
//! tags the resulting trait left/right, so "L testes 5x3mm, R testes 4x3mm"
//! yields two separate `testes_size` traits rather than one with the second
//! side silently overwriting the first. The key itself only needs to appear
//! once: "ovaries left 10x5 mm, right 10x6 mm" falls through to the bare
//! (keyless) producer for its second measurement, rescued by the
//! `SIZE_BARE_LOOKBACK` fix-up that confirms a gonad word precedes it.

use crate::catalog;
use crate::conversion;
use crate::engine::errors::RuleBuildError;
use crate::engine::pattern::{any_of, cap, opt, seq, tok};
use crate::engine::rule::MatchCtx;
use crate::engine::{Rule, TraitParser, fragment, keyword, producer, replacer};
use crate::regex;
use crate::trait_model::{Side, Trait, TraitValue};

const SIZE_BARE_LOOKBACK: usize = 40;

fn side_from(ctx: &MatchCtx) -> Option<Side> {
    match ctx.groups.get("side")?.to_ascii_lowercase().as_str() {
        "l" | "lft" | "left" => Some(Side::Left),
        "r" | "rt" | "right" => Some(Side::Right),
        _ => None,
    }
}

fn size_trait(kind: &'static str, ctx: &MatchCtx) -> Option<Trait> {
    let a = conversion::to_float(ctx.groups.get("a")?)?;
    let b = ctx.groups.get("b").and_then(conversion::to_float);
    let value = conversion::cross(a, b);
    let t = Trait::new(kind, ctx.span, value);
    let t = match ctx.groups.get("units").and_then(|u| conversion::convert_length_mm(a, u)) {
        Some((_, label)) => t.with_units(label, false),
        None => t.with_units("mm", true),
    };
    Some(match side_from(ctx) {
        Some(side) => t.with_side(side),
        None => t,
    })
}

fn state_trait(kind: &'static str, ctx: &MatchCtx) -> Option<Trait> {
    let raw = ctx.groups.get("value")?;
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    Some(match side_from(ctx) {
        Some(side) => Trait::new(kind, ctx.span, TraitValue::None).with_text(value).with_side(side),
        None => Trait::new(kind, ctx.span, TraitValue::None).with_text(value),
    })
}

fn build_size(kind: &'static str, key_pattern: &'static str) -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("number"),
        catalog::get("x"),
        catalog::get("len_units"),
        catalog::get("side"),
        keyword("size_key", regex!(key_pattern)),
        producer(
            "keyed",
            seq(vec![
                opt(tok("side")),
                tok("size_key"),
                cap("a", tok("number")),
                tok("x"),
                cap("b", tok("number")),
                opt(cap("units", tok("len_units"))),
            ]),
            move |ctx| size_trait(kind, ctx).map(|t| vec![t]).unwrap_or_default(),
        ),
        producer(
            "bare",
            seq(vec![
                opt(tok("side")),
                cap("a", tok("number")),
                tok("x"),
                cap("b", tok("number")),
                opt(cap("units", tok("len_units"))),
            ]),
            move |ctx| size_trait(kind, ctx).map(|t| vec![t]).unwrap_or_default(),
        ),
    ];
    TraitParser::build(kind, rules).map(|p| p.with_fix_up(Box::new(move |t: &Trait, text: &str| {
        // The bare route has no key token of its own; keep it only when a
        // gonad word shows up somewhere earlier in the record, so a stray
        // "5x3 mm" skull or nest measurement elsewhere doesn't leak in here.
        let start = t.start().saturating_sub(SIZE_BARE_LOOKBACK);
        let window = &text[start..t.start()];
        if regex!(r"(?i)\b(?:testes?|testis|ovar\w*|gonads?)\b").is_match(window) {
            Some(t.clone())
        } else {
            None
        }
    })))
}

pub fn build_testes_state() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("side"),
        keyword("testes_key", regex!(r"(?i)\b(?:testes|testis|test\.?|tst\.?)\b")),
        fragment(
            "state_word",
            regex!(r"(?i)\b(?:not\s+descended|partially\s+descended|undescended|descended|scrotal|abdominal|inguinal|recrudescent|regressed)\b"),
        ),
        producer(
            "testes_state",
            seq(vec![opt(tok("side")), tok("testes_key"), cap("value", tok("state_word"))]),
            |ctx| state_trait("testes_state", ctx).map(|t| vec![t]).unwrap_or_default(),
        ),
    ];
    TraitParser::build("testes_state", rules)
}

pub fn build_ovaries_state() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("side"),
        keyword("ovaries_key", regex!(r"(?i)\b(?:ovaries|ovary|ovar\.?)\b")),
        keyword("and_uterine_horns", regex!(r"(?i)\band\s+uterine\s+horns\b")),
        // "ovaries and uterine horns" is the same anatomical key as bare
        // "ovaries"; absorb the trailing phrase into one token rather than
        // teaching every downstream producer about a second key spelling.
        replacer("ovaries_key_full", seq(vec![tok("ovaries_key"), tok("and_uterine_horns")])),
        fragment(
            "state_word",
            regex!(r"(?i)\b(?:not\s+visible|visible|enlarged|small|mature|immature|inactive|active|quiescent)\b"),
        ),
        producer(
            "ovaries_state",
            seq(vec![
                opt(tok("side")),
                any_of(&["ovaries_key", "ovaries_key_full"]),
                cap("value", tok("state_word")),
            ]),
            |ctx| state_trait("ovaries_state", ctx).map(|t| vec![t]).unwrap_or_default(),
        ),
    ];
    TraitParser::build("ovaries_state", rules)
}

pub fn build_gonads_state() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("side"),
        keyword("gonads_key", regex!(r"(?i)\bgonads?\b")),
        fragment(
            "state_word",
            regex!(r"(?i)\b(?:not\s+visible|visible|enlarged|small|descended|undescended|scrotal|mature|immature|inactive|active)\b"),
        ),
        producer(
            "gonads_state",
            seq(vec![opt(tok("side")), tok("gonads_key"), cap("value", tok("state_word"))]),
            |ctx| state_trait("gonads_state", ctx).map(|t| vec![t]).unwrap_or_default(),
        ),
    ];
    TraitParser::build("gonads_state", rules)
}

pub fn build_testes_size() -> Result<TraitParser, RuleBuildError> {
    build_size("testes_size", r"(?i)\b(?:testes|testis|test\.?|tst\.?)(?:\s+size)?\b")
}

pub fn build_ovaries_size() -> Result<TraitParser, RuleBuildError> {
    build_size("ovaries_size", r"(?i)\b(?:ovaries|ovary|ovar\.?)(?:\s+size)?\b")
}

pub fn build_all() -> Result<Vec<TraitParser>, RuleBuildError> {
    Ok(vec![
        build_testes_state()?,
        build_testes_size()?,
        build_ovaries_state()?,
        build_ovaries_size()?,
        build_gonads_state()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testes_descended_and_cross_size() {
        let state = build_testes_state().unwrap().parse("reproductive data=Testes descended, 5x3 mm");
        assert_eq!(state.len(), 1);
        assert_eq!(state[0].kind, "testes_state");
        assert_eq!(state[0].value_text.as_deref(), Some("descended"));

        let size = build_testes_size().unwrap().parse("reproductive data=Testes descended, 5x3 mm");
        assert_eq!(size.len(), 1);
        assert_eq!(size[0].kind, "testes_size");
        assert_eq!(size[0].value, TraitValue::Pair(5.0, 3.0));
        assert_eq!(size[0].units, Some("mm"));
    }

    #[test]
    fn side_paired_testes_size() {
        let parser = build_testes_size().unwrap();
        let traits = parser.parse("L testes 5x3 mm, R testes 4x3 mm");
        assert_eq!(traits.len(), 2);
        assert_eq!(traits[0].side, Some(Side::Left));
        assert_eq!(traits[1].side, Some(Side::Right));
    }

    #[test]
    fn ovaries_size_single_key_with_side_tagged_measurements() {
        let parser = build_ovaries_size().unwrap();
        let traits = parser.parse("ovaries left 10x5 mm, right 10x6 mm");
        assert_eq!(traits.len(), 2);
        assert_eq!(traits[0].side, Some(Side::Left));
        assert_eq!(traits[0].value, TraitValue::Pair(10.0, 5.0));
        assert_eq!(traits[1].side, Some(Side::Right));
        assert_eq!(traits[1].value, TraitValue::Pair(10.0, 6.0));
    }

    #[test]
    fn ovaries_state_matches_vocabulary() {
        let traits = build_ovaries_state().unwrap().parse("ovaries small, not visible");
        assert!(!traits.is_empty());
        assert_eq!(traits[0].kind, "ovaries_state");
    }

    #[test]
    fn ovaries_and_uterine_horns_synonym_absorbed() {
        let traits = build_ovaries_state().unwrap().parse("ovaries and uterine horns enlarged");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value_text.as_deref(), Some("enlarged"));
    }
}
