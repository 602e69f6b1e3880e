//! `sex` trait family: normalizes to `male`/`female`/`unknown`, optionally
//! suffixed with `?` when the record itself hedges ("sex=female ?").
//!
//! Grounded in `lib/traits/sex_trait.py` / `lib/lexers/sex_lexer.py`.

use crate::engine::errors::RuleBuildError;
use crate::engine::pattern::{cap, opt, seq, tok};
use crate::engine::rule::MatchCtx;
use crate::engine::{Rule, TraitParser, fragment, keyword, producer};
use crate::regex;
use crate::trait_model::{Trait, TraitValue};

pub fn build() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        keyword("sex_key", regex!(r"(?i)\bsex\b")),
        fragment("sex_word", regex!(r"(?i)\b(?:females?|males?|unknown)\b")),
        fragment("quest", regex!(r"\?")),
        producer("sex_with_key", seq(vec![tok("sex_key"), cap("value", seq(vec![tok("sex_word"), opt(tok("quest"))]))]), convert),
        producer("sex_bare", cap("value", seq(vec![tok("sex_word"), opt(tok("quest"))])), convert),
    ];
    TraitParser::build("sex", rules)
}

fn convert(ctx: &MatchCtx) -> Vec<Trait> {
    let Some(raw) = ctx.groups.get("value") else { return Vec::new() };
    let value = normalize(raw);
    if value.is_empty() {
        return Vec::new();
    }
    vec![Trait::new("sex", ctx.span, TraitValue::None).with_text(value)]
}

/// `female?` stays `female?`; stray whitespace before a trailing `?` is
/// dropped (`"female ?"` -> `"female?"`); `m...`/`f...` prefixes normalize
/// to the canonical word, matching `SexTrait.convert`'s regex substitutions.
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let (body, quest) = match trimmed.strip_suffix('?') {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    };
    let lower = body.to_ascii_lowercase();
    let mut canonical = if lower.starts_with('m') {
        "male".to_string()
    } else if lower.starts_with('f') {
        "female".to_string()
    } else if lower == "unknown" {
        "unknown".to_string()
    } else {
        return String::new();
    };
    if quest {
        canonical.push('?');
    }
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keyed_hedged_value() {
        let parser = build().unwrap();
        let traits = parser.parse("sex=female ?");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].kind, "sex");
        assert_eq!(traits[0].value_text.as_deref(), Some("female?"));
        assert_eq!(traits[0].start(), 0);
        assert_eq!(traits[0].end(), 12);
    }

    #[test]
    fn parses_bare_male() {
        let parser = build().unwrap();
        let traits = parser.parse("adult male specimen");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value_text.as_deref(), Some("male"));
    }

    #[test]
    fn no_match_is_empty() {
        let parser = build().unwrap();
        assert!(parser.parse("no sex information here").is_empty());
    }
}
