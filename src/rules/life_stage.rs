//! `life_stage` trait family: value preserved verbatim (lowercased).
//! Embryo/fetus language is explicitly excluded from the vocabulary here --
//! that data belongs to the reproductive trait families instead.
//!
//! Grounded in `tests/test_life_stage.py` / `tests/traits/test_life_stage.py`.
//! The bare `age` key is deliberately permissive (any 1-3 following words)
//! and relies on [`fix_up`] to reject non-biological uses, per §4.5 and the
//! `age determined by 20-sided die` scenario in §8.

use crate::engine::errors::RuleBuildError;
use crate::engine::pattern::{cap, rep, seq, tok};
use crate::engine::rule::MatchCtx;
use crate::engine::{Rule, TraitParser, fragment, keyword, producer};
use crate::regex;
use crate::trait_model::{Trait, TraitValue};

const FALSE_LEAD_WINDOW: usize = 24;

pub fn build() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        fragment(
            "stage_word",
            regex!(
                r"(?i)\b(?:adults?|subadults?|juveniles?|juv|immatures?|imm|yearlings?|young|larv(?:ae|a)?|pupa[el]?|nestlings?|fledglings?|neonates?|hatchlings?|first[\s-]year)\b"
            ),
        ),
        keyword("age_key", regex!(r"(?i)\bage\b")),
        fragment("word", regex!(r"(?i)\b[a-z]+\b")),
        producer("life_stage_explicit", cap("value", tok("stage_word")), convert_explicit),
        producer("life_stage_ambiguous", seq(vec![tok("age_key"), cap("value", rep(tok("word"), 1, 3))]), convert_ambiguous),
    ];
    TraitParser::build("life_stage", rules).map(|p| p.with_fix_up(Box::new(fix_up)))
}

fn convert_explicit(ctx: &MatchCtx) -> Vec<Trait> {
    make_trait(ctx, false)
}

fn convert_ambiguous(ctx: &MatchCtx) -> Vec<Trait> {
    make_trait(ctx, true)
}

fn make_trait(ctx: &MatchCtx, ambiguous_key: bool) -> Vec<Trait> {
    let Some(raw) = ctx.groups.get("value") else { return Vec::new() };
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Vec::new();
    }
    vec![Trait::new("life_stage", ctx.span, TraitValue::None).with_text(value).with_ambiguous_key(ambiguous_key)]
}

/// Rejects the ambiguous `age` route when the surrounding text reads like a
/// die/game reference (`"20-sided die"`) rather than a specimen's age.
fn fix_up(t: &Trait, text: &str) -> Option<Trait> {
    if !t.ambiguous_key {
        return Some(t.clone());
    }
    let window_end = (t.end() + FALSE_LEAD_WINDOW).min(text.len());
    let window = &text[t.start()..window_end];
    if regex!(r"(?i)\d+-sided").is_match(window) {
        return None;
    }
    Some(t.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_vocabulary_matches() {
        let parser = build().unwrap();
        let traits = parser.parse("life stage: subadult");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value_text.as_deref(), Some("subadult"));
        assert!(!traits[0].ambiguous_key);
    }

    #[test]
    fn ambiguous_age_key_is_vetoed_near_sided_die() {
        let parser = build().unwrap();
        let traits = parser.parse("age determined by 20-sided die");
        assert!(traits.is_empty());
    }

    #[test]
    fn embryo_language_is_not_a_life_stage() {
        let parser = build().unwrap();
        assert!(parser.parse("3 embryos").is_empty());
    }
}
