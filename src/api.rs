//! The programmatic entry point (component 9 / §6): `Parser::parse` runs
//! every trait family's [`crate::engine::TraitParser`] over one input and
//! merges their output into a single span-ordered [`Trait`] list.
//!
//! ```
//! use traiter::Parser;
//!
//! let parser = Parser::new();
//! let traits = parser.parse("total length=180 mm; tail length=82 mm; hind foot=28");
//! assert_eq!(traits.len(), 3);
//! ```

use crate::engine::{PassTrace, TraitParser};
use crate::rules;
use crate::trait_model::Trait;
use once_cell::sync::Lazy;

static FAMILIES: Lazy<Vec<TraitParser>> = Lazy::new(rules::all);

/// Parsing context: the optional source-field tag from §6's
/// `Parser.parse(text, field?)` signature. The reference implementation's
/// `field` argument threads the originating museum-record column (e.g.
/// `"dynamicproperties"` vs `"occurrenceremarks"`) through to a handful of
/// per-field heuristics in a few legacy parsers; `pylib/vertnet` (this
/// crate's canonical source layer per the spec's Open Question) does not
/// vary its own matching behavior on it, so `field` is carried here for API
/// parity and future per-field tuning rather than consulted by any producer
/// today.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub field: Option<String>,
}

/// Tunable parsing behavior. `drop_counts_over` is §7.4/§8's "counts > 1000
/// are silently dropped" threshold, made configurable rather than a buried
/// constant so a deployment ingesting records with legitimately large
/// colony counts (for example) can raise it without recompiling.
#[derive(Debug, Clone)]
pub struct Options {
    pub drop_counts_over: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self { drop_counts_over: 1000 }
    }
}

/// Runs every registered trait family over `text` and returns the merged,
/// span-ordered trait list.
///
/// `parser.families()` are built once (regex compiled, rule graphs
/// validated) behind a `once_cell::sync::Lazy` the first time any `Parser`
/// is used; the parser itself is a zero-sized handle onto that shared,
/// `Send + Sync` state (§5: parsing is allocation-light and the compiled
/// rule set is safe to share across parallel callers).
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `text` with default [`Context`]/[`Options`].
    pub fn parse(&self, text: &str) -> Vec<Trait> {
        self.parse_with(text, &Context::default(), &Options::default())
    }

    /// Parses `text`, tagging `context.field` is accepted for API parity
    /// (see [`Context`]) and applying `options.drop_counts_over` as a
    /// post-merge filter on every `*_count` trait.
    pub fn parse_with(&self, text: &str, _context: &Context, options: &Options) -> Vec<Trait> {
        let mut traits: Vec<Trait> =
            FAMILIES.iter().flat_map(|family| family.parse(text)).collect();

        traits.retain(|t| !is_count_kind(t.kind) || within_count_limit(t, options.drop_counts_over));
        traits.sort_by_key(|t| (t.start(), t.end()));
        traits
    }

    /// Same as [`Self::parse_with`], but also returns every family's
    /// per-pass token trace (see [`crate::engine::TraitParser::parse_traced`]),
    /// keyed by family name. Used by the CLI's `TRAITER_DEBUG_RULES` mode;
    /// not exercised on the plain parse path since collecting these clones
    /// every intermediate token stream.
    pub fn parse_traced_with(
        &self,
        text: &str,
        _context: &Context,
        options: &Options,
    ) -> (Vec<Trait>, Vec<(&'static str, Vec<PassTrace>)>) {
        let mut traits = Vec::new();
        let mut traces = Vec::new();
        for family in FAMILIES.iter() {
            let (family_traits, trace) = family.parse_traced(text);
            traits.extend(family_traits);
            traces.push((family.name(), trace));
        }
        traits.retain(|t| !is_count_kind(t.kind) || within_count_limit(t, options.drop_counts_over));
        traits.sort_by_key(|t| (t.start(), t.end()));
        (traits, traces)
    }
}

fn is_count_kind(kind: &str) -> bool {
    kind.ends_with("_count")
}

fn within_count_limit(t: &Trait, limit: u32) -> bool {
    let limit = limit as f64;
    match &t.value {
        crate::trait_model::TraitValue::Number(n) => *n <= limit,
        crate::trait_model::TraitValue::Pair(a, b) => *a <= limit && *b <= limit,
        crate::trait_model::TraitValue::None => true,
    }
}

/// Parses `text` using the default [`Parser`], tagging the output with an
/// optional source-field name (see [`Context::field`]).
pub fn parse(text: &str, field: Option<&str>) -> Vec<Trait> {
    let context = Context { field: field.map(str::to_string) };
    parse_with(text, &context, &Options::default())
}

/// Parses `text` with an explicit [`Context`]/[`Options`].
pub fn parse_with(text: &str, context: &Context, options: &Options) -> Vec<Trait> {
    Parser::new().parse_with(text, context, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_and_sorts_across_families() {
        let traits = parse("sex=female ?; total length=180 mm", None);
        assert_eq!(traits.len(), 2);
        assert_eq!(traits[0].kind, "sex");
        assert_eq!(traits[1].kind, "total_length");
    }

    #[test]
    fn drop_counts_over_is_configurable() {
        let options = Options { drop_counts_over: 50 };
        let traits = parse_with("placental scars: 40", &Context::default(), &options);
        assert_eq!(traits.len(), 1);

        let traits = parse_with("placental scars: 60", &Context::default(), &options);
        assert!(traits.is_empty());
    }

    #[test]
    fn implausible_counts_drop_at_default_threshold() {
        let traits = parse("3 embryos, 90210 placental scars", None);
        assert!(traits.iter().any(|t| t.kind == "embryo_count"));
        assert!(!traits.iter().any(|t| t.kind == "placental_scar_count"));
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(parse("no recognizable trait data", None).is_empty());
    }
}
