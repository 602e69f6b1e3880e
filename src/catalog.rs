//! Rule catalog: a process-wide keyed collection of [`Rule`]s that trait
//! family modules compose by reference instead of re-declaring the same
//! vocabulary fragment (a number, a side marker, a length unit, ...) in
//! every file that needs it.
//!
//! Grounded in `pylib/stacked_regex/rule_catalog.py`'s `RuleCatalog` and the
//! shared fragments in `pylib/vertnet/shared_patterns.py` /
//! `pylib/shared/patterns.py`. [`get`] hands back a `Rule::clone()`, which
//! is cheap: the compiled regex behind a fragment/keyword rule is a
//! `&'static Regex` (a pointer), and the token-pattern atoms of a
//! replacer/grouper are plain data -- nothing is ever recompiled.
//!
//! `regex` (unlike the reference implementation's `regex` Python package)
//! supports neither lookaround nor backreferences, so a few fragments below
//! approximate the source's `(?<!...)`/`(?!...)` guards with `\b` word
//! boundaries instead; see the per-fragment comments.

use crate::engine::{Rule, fragment, keyword};
use crate::regex;
use once_cell::sync::Lazy;
use std::collections::HashMap;

struct Catalog(HashMap<&'static str, Rule>);

impl Catalog {
    fn insert(&mut self, rule: Rule) {
        let prev = self.0.insert(rule.name, rule);
        assert!(prev.is_none(), "duplicate catalog entry");
    }
}

/// Fetches a named catalog rule. Panics on an unknown name: every caller
/// names a fragment declared in [`build`] below, so a miss is a programming
/// error in a trait family module, not a runtime condition to recover from.
pub fn get(name: &'static str) -> Rule {
    CATALOG.0.get(name).unwrap_or_else(|| panic!("catalog: no such rule `{name}`")).clone()
}

static CATALOG: Lazy<Catalog> = Lazy::new(build);

fn build() -> Catalog {
    let mut cat = Catalog(HashMap::new());

    // UUIDs (specimen catalog numbers) contain digit runs that otherwise
    // look like shorthand or bare counts; every numeric-scanning family
    // registers this ahead of its own number fragments so the scanner's
    // earliest-declared-wins tie-break swallows it whole first.
    cat.insert(fragment(
        "uuid",
        regex!(r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}\b"),
    ));

    // A plain decimal number, optionally thousands-grouped, optionally
    // bracketed to mark an estimate (`estimated_value`).
    cat.insert(fragment(
        "number",
        regex!(r"(?i)(?P<estimated_value>\[)?(?:\d{1,3}(?:,\d{3}){1,3}|\d+)(?:\.\d+)?\]?|\.\d+"),
    ));

    cat.insert(keyword("dash", regex!(r"(?i)\s*-\s*")));
    cat.insert(keyword("to", regex!(r"(?i)\bto\b")));
    cat.insert(keyword("x", regex!(r"(?i)[x×]")));
    cat.insert(keyword("by", regex!(r"(?i)\bby\b")));
    cat.insert(keyword("slash", regex!(r"(?i)/")));
    cat.insert(keyword("comma", regex!(r"(?i),")));
    cat.insert(keyword("semicolon", regex!(r"(?i);")));
    cat.insert(keyword("eq", regex!(r"(?i)[=:]")));
    cat.insert(keyword("op", regex!(r"(?i)\+")));
    cat.insert(keyword("conj", regex!(r"(?i)\b(?:and|or)\b")));
    cat.insert(keyword("prep", regex!(r"(?i)\b(?:on|of|in)\b")));
    cat.insert(keyword("none", regex!(r"(?i)\b(?:no|none|not)\b")));

    // Length units. `units` carries the matched spelling so `convert_units`
    // can look it up case-insensitively regardless of which alternative won.
    cat.insert(keyword(
        "metric_len",
        regex!(r"(?i)(?P<units>millimeters?|mm\.?|centimeters?|cm\.?|meters?|m\b)"),
    ));
    cat.insert(keyword("feet", regex!(r"(?i)(?P<units>feet|foot|ft\.?)")));
    cat.insert(keyword("inches", regex!(r"(?i)(?P<units>inch(?:es)?|in\.?)")));
    cat.insert(keyword(
        "len_units",
        regex!(r"(?i)(?P<units>millimeters?|mm\.?|centimeters?|cm\.?|meters?|feet|foot|ft\.?|inch(?:es)?|in\.?)"),
    ));
    cat.insert(keyword("pounds", regex!(r"(?i)(?P<units>pounds?|lbs?\.?)")));
    cat.insert(keyword("ounces", regex!(r"(?i)(?P<units>ounces?|ozs?\.?)")));
    cat.insert(keyword(
        "mass_units",
        regex!(r"(?i)(?P<units>kilograms?|kgs?\.?|milligrams?|mgs?\.?|grams?|gm?s?\.?|pounds?|lbs?\.?|ounces?|ozs?\.?)"),
    ));

    // Side / dimension markers shared by gonad and scar parsers.
    cat.insert(keyword(
        "side",
        regex!(r"(?i)\b(?P<side>both|left|right|lft|rt|[lr])\b"),
    ));
    cat.insert(keyword("dimension", regex!(r"(?i)\b(?P<dim>length|width)\b")));

    // Bare single words, used as filler between a key and its value.
    cat.insert(fragment("word", regex!(r"(?i)\b[a-z]\w*\b")));
    cat.insert(fragment("sep", regex!(r"(?i)[;,]")));

    // Shorthand decoder (component 8): shared by every length family and
    // body_mass so `"192-84-31-19=38g"` only needs to be declared once.
    cat.insert(fragment("shorthand", crate::shorthand::shorthand_regex()));
    cat.insert(fragment("triple", crate::shorthand::triple_regex()));

    cat
}
