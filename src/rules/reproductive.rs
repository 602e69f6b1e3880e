//! Reproductive trait families: `placental_scar_count`, `embryo_count`,
//! `lactation_state`, `nipple_state`, `pregnancy_state`.
//!
//! Grounded in `pylib/vertnet/parsers/placental_scar_count.py`,
//! `pylib/vertnet/parsers/embryo_count.py` and
//! `pylib/vertnet/parsers/lactation_state.py`.

use crate::catalog;
use crate::conversion;
use crate::engine::errors::RuleBuildError;
use crate::engine::pattern::{any_of, cap, seq, tok};
use crate::engine::rule::MatchCtx;
use crate::engine::{Rule, TraitParser, fragment, keyword, producer};
use crate::regex;
use crate::trait_model::{Side, Trait, TraitValue};

/// Embryo/scar counts above this are almost always an OCR or transcription
/// artifact (a catalog number swallowed whole) rather than a real count.
const MAX_PLAUSIBLE_COUNT: i64 = 1000;

fn side_from_raw(raw: &str) -> Option<Side> {
    match raw.to_ascii_lowercase().as_str() {
        "l" | "lft" | "left" => Some(Side::Left),
        "r" | "rt" | "right" => Some(Side::Right),
        _ => None,
    }
}

// ---------------------------------------------------------------------
// placental_scar_count
// ---------------------------------------------------------------------

pub fn build_placental_scar_count() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("number"),
        catalog::get("side"),
        catalog::get("op"),
        keyword("scar_key", regex!(r"(?i)\b(?:placental\s+scars?|plac\.?\s*scars?|scars?)\b")),
        producer(
            "scar_count_sided",
            seq(vec![
                tok("scar_key"),
                cap("left", tok("number")),
                tok("side"),
                tok("op"),
                cap("right", tok("number")),
                tok("side"),
            ]),
            scar_count_sided,
        ),
        producer("scar_count_simple", seq(vec![tok("scar_key"), cap("value", tok("number"))]), scar_count_simple),
    ];
    TraitParser::build("placental_scar_count", rules)
}

fn scar_count_sided(ctx: &MatchCtx) -> Vec<Trait> {
    let (Some(left), Some(right)) = (ctx.groups.get("left"), ctx.groups.get("right")) else {
        return Vec::new();
    };
    let (left, right) = (conversion::to_int(left), conversion::to_int(right));
    let total = left + right;
    if total < 0 || total > MAX_PLAUSIBLE_COUNT {
        return Vec::new();
    }
    vec![Trait::new("placental_scar_count", ctx.span, TraitValue::Pair(left as f64, right as f64)).with_text(format!("{total} total"))]
}

fn scar_count_simple(ctx: &MatchCtx) -> Vec<Trait> {
    let Some(raw) = ctx.groups.get("value") else { return Vec::new() };
    let count = conversion::to_int(raw);
    if count < 0 || count > MAX_PLAUSIBLE_COUNT {
        return Vec::new();
    }
    vec![Trait::new("placental_scar_count", ctx.span, TraitValue::Number(count as f64))]
}

// ---------------------------------------------------------------------
// embryo_count
// ---------------------------------------------------------------------

pub fn build_embryo_count() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("number"),
        catalog::get("side"),
        keyword("embryo_key", regex!(r"(?i)\b(?:embryos?|emb\.?|fetuses|foetuses|foetus|fetus)\b")),
        producer(
            "embryo_count_sided",
            seq(vec![tok("embryo_key"), cap("value", tok("number")), tok("side")]),
            embryo_count_sided,
        ),
        producer("embryo_count_simple", seq(vec![tok("embryo_key"), cap("value", tok("number"))]), embryo_count_simple),
    ];
    TraitParser::build("embryo_count", rules)
}

fn embryo_count_sided(ctx: &MatchCtx) -> Vec<Trait> {
    let Some(raw) = ctx.groups.get("value") else { return Vec::new() };
    let count = conversion::to_int(raw);
    if count < 0 || count > MAX_PLAUSIBLE_COUNT {
        return Vec::new();
    }
    let mut t = Trait::new("embryo_count", ctx.span, TraitValue::Number(count as f64));
    if let Some(side) = ctx.groups.get("side").and_then(side_from_raw) {
        t = t.with_side(side);
    }
    vec![t]
}

fn embryo_count_simple(ctx: &MatchCtx) -> Vec<Trait> {
    let Some(raw) = ctx.groups.get("value") else { return Vec::new() };
    let count = conversion::to_int(raw);
    if count < 0 || count > MAX_PLAUSIBLE_COUNT {
        return Vec::new();
    }
    vec![Trait::new("embryo_count", ctx.span, TraitValue::Number(count as f64))]
}

// ---------------------------------------------------------------------
// lactation_state
// ---------------------------------------------------------------------

pub fn build_lactation_state() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        fragment("not_prefix", regex!(r"(?i)\bnot\b")),
        fragment("post_prefix", regex!(r"(?i)\bpost[\s-]?\b")),
        keyword("lactating_word", regex!(r"(?i)\blactat\w*\b")),
        producer(
            "lactation_with_prefix",
            seq(vec![cap("prefix", any_of(&["not_prefix", "post_prefix"])), tok("lactating_word")]),
            lactation_with_prefix,
        ),
        producer("lactation_bare", cap("value", tok("lactating_word")), lactation_bare),
    ];
    TraitParser::build("lactation_state", rules)
}

fn lactation_with_prefix(ctx: &MatchCtx) -> Vec<Trait> {
    let value = match ctx.groups.get("prefix") {
        Some(p) if p.eq_ignore_ascii_case("not") => "not lactating",
        Some(_) => "post-lactating",
        None => "lactating",
    };
    vec![Trait::new("lactation_state", ctx.span, TraitValue::None).with_text(value)]
}

fn lactation_bare(ctx: &MatchCtx) -> Vec<Trait> {
    if ctx.groups.get("value").is_none() {
        return Vec::new();
    }
    vec![Trait::new("lactation_state", ctx.span, TraitValue::None).with_text("lactating")]
}

// ---------------------------------------------------------------------
// nipple_state
// ---------------------------------------------------------------------

pub fn build_nipple_state() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        keyword("nipple_key", regex!(r"(?i)\bnipples?\b")),
        fragment(
            "nipple_word",
            regex!(r"(?i)\b(?:enlarged|prominent|small|not\s+visible|visible|inactive|active|worn|filled)\b"),
        ),
        producer("nipple_state", seq(vec![tok("nipple_key"), cap("value", tok("nipple_word"))]), |ctx| {
            let Some(raw) = ctx.groups.get("value") else { return Vec::new() };
            let value = raw.trim().to_ascii_lowercase();
            if value.is_empty() {
                return Vec::new();
            }
            vec![Trait::new("nipple_state", ctx.span, TraitValue::None).with_text(value)]
        }),
    ];
    TraitParser::build("nipple_state", rules)
}

// ---------------------------------------------------------------------
// pregnancy_state
// ---------------------------------------------------------------------

pub fn build_pregnancy_state() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        fragment("not_prefix", regex!(r"(?i)\bnot\b")),
        keyword("pregnant_word", regex!(r"(?i)\bpregnant\b|\bgravid\b")),
        producer(
            "pregnancy_with_prefix",
            seq(vec![cap("prefix", tok("not_prefix")), tok("pregnant_word")]),
            |ctx| {
                if ctx.groups.get("prefix").is_none() {
                    return Vec::new();
                }
                vec![Trait::new("pregnancy_state", ctx.span, TraitValue::None).with_text("not pregnant")]
            },
        ),
        producer("pregnancy_bare", cap("value", tok("pregnant_word")), |ctx| {
            if ctx.groups.get("value").is_none() {
                return Vec::new();
            }
            vec![Trait::new("pregnancy_state", ctx.span, TraitValue::None).with_text("pregnant")]
        }),
    ];
    TraitParser::build("pregnancy_state", rules)
}

pub fn build_all() -> Result<Vec<TraitParser>, RuleBuildError> {
    Ok(vec![
        build_placental_scar_count()?,
        build_embryo_count()?,
        build_lactation_state()?,
        build_nipple_state()?,
        build_pregnancy_state()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_scar_count() {
        let parser = build_placental_scar_count().unwrap();
        let traits = parser.parse("placental scars: 4");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Number(4.0));
    }

    #[test]
    fn sided_scar_count() {
        let parser = build_placental_scar_count().unwrap();
        let traits = parser.parse("scars 2 l + 3 r");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Pair(2.0, 3.0));
    }

    #[test]
    fn implausible_scar_count_is_dropped() {
        let parser = build_placental_scar_count().unwrap();
        assert!(parser.parse("placental scars: 90210").is_empty());
    }

    #[test]
    fn simple_embryo_count() {
        let parser = build_embryo_count().unwrap();
        let traits = parser.parse("3 embryos");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Number(3.0));
    }

    #[test]
    fn implausible_embryo_count_is_dropped() {
        let parser = build_embryo_count().unwrap();
        assert!(parser.parse("embryos 123456").is_empty());
    }

    #[test]
    fn lactation_prefix_variants() {
        let parser = build_lactation_state().unwrap();
        assert_eq!(parser.parse("not lactating")[0].value_text.as_deref(), Some("not lactating"));
        assert_eq!(parser.parse("lactating female")[0].value_text.as_deref(), Some("lactating"));
    }

    #[test]
    fn pregnancy_state_not_prefix() {
        let parser = build_pregnancy_state().unwrap();
        assert_eq!(parser.parse("not pregnant")[0].value_text.as_deref(), Some("not pregnant"));
        assert_eq!(parser.parse("female, pregnant")[0].value_text.as_deref(), Some("pregnant"));
    }
}
