use super::build;
use super::errors::RuleBuildError;
use super::produce::apply_producer_pass;
use super::rewrite::run_to_fixpoint;
use super::rule::{Rule, RuleKind};
use super::scanner::scan;
use super::token::Token;
use crate::trait_model::Trait;

/// A post-production veto: given the finished trait and the full original
/// text, decide whether to keep it. Mirrors `fix_up_trait` in the reference
/// parsers, which looks a fixed window of characters before/after an
/// ambiguous single-letter key to rule out false positives like a
/// specimen ID ("E12345") being mistaken for an ear-length key ("E: 12").
pub type FixUp = Box<dyn Fn(&Trait, &str) -> Option<Trait> + Send + Sync>;

/// One trait family's complete rule set: the fragments/keywords it scans
/// for, the replacer/grouper rules that build up composite tokens, the
/// producer rules that emit [`Trait`]s, and an optional fix-up veto run on
/// every trait the pass produces.
pub struct TraitParser {
    name: &'static str,
    rules: Vec<Rule>,
    fix_up: Option<FixUp>,
}

impl TraitParser {
    /// Validates the rule set's dependency graph and builds a parser.
    /// Returns an error instead of panicking so a malformed trait module
    /// fails loudly at construction rather than silently dropping matches.
    pub fn build(name: &'static str, rules: Vec<Rule>) -> Result<Self, RuleBuildError> {
        build::validate(&rules)?;
        Ok(Self { name, rules, fix_up: None })
    }

    pub fn with_fix_up(mut self, fix_up: FixUp) -> Self {
        self.fix_up = Some(fix_up);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the full pipeline: scan, replace to fixpoint, group to
    /// fixpoint, produce, fix up. Traits are returned in span order.
    pub fn parse(&self, text: &str) -> Vec<Trait> {
        self.parse_traced(text).0
    }

    /// Same pipeline as [`Self::parse`], but also returns the token stream
    /// at each pass boundary (scan, post-replace, post-group), named after
    /// the pass that produced it. Used by the CLI's `TRAITER_DEBUG_RULES`
    /// trace (see `engine` module docs); the plain [`Self::parse`] path
    /// does not pay for collecting these.
    pub fn parse_traced(&self, text: &str) -> (Vec<Trait>, Vec<PassTrace>) {
        let scan_rules: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| matches!(r.kind, RuleKind::Fragment | RuleKind::Keyword))
            .collect();
        let replacer_rules: Vec<&Rule> =
            self.rules.iter().filter(|r| r.kind == RuleKind::Replacer).collect();
        let grouper_rules: Vec<&Rule> =
            self.rules.iter().filter(|r| r.kind == RuleKind::Grouper).collect();
        let producer_rules: Vec<&Rule> =
            self.rules.iter().filter(|r| r.kind == RuleKind::Producer).collect();

        let mut trace = Vec::new();

        let scanned = scan(&scan_rules, text);
        trace.push(PassTrace { stage: "scan", tokens: scanned.clone() });

        let replaced = run_to_fixpoint(&replacer_rules, scanned, text);
        trace.push(PassTrace { stage: "replace", tokens: replaced.clone() });

        let grouped = run_to_fixpoint(&grouper_rules, replaced, text);
        trace.push(PassTrace { stage: "group", tokens: grouped.clone() });

        let mut traits = apply_producer_pass(&producer_rules, &grouped, text);

        if let Some(fix_up) = &self.fix_up {
            traits = traits.into_iter().filter_map(|t| fix_up(&t, text)).collect();
        }

        traits.sort_by_key(|t| (t.start(), t.end()));
        (traits, trace)
    }
}

/// The token stream at one pass boundary, captured for `TRAITER_DEBUG_RULES`
/// tracing. `stage` is one of `"scan"`, `"replace"`, `"group"`.
pub struct PassTrace {
    pub stage: &'static str,
    pub tokens: Vec<Token>,
}
