use super::pattern::TokenAtom;
use super::token::{Groups, Range};
use crate::trait_model::Trait;
use regex::Regex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Matches raw text, always present in the output stream, named for
    /// the concept it denotes (`key`, `pair`, `side`, ...).
    Fragment,
    /// Like [`RuleKind::Fragment`], but the pattern is a literal word or
    /// phrase list rather than a hand-written regex body.
    Keyword,
    /// Rewrites a run of tokens into one token of the same informational
    /// content, run to a fixpoint before groupers run.
    Replacer,
    /// Rewrites a run of tokens into one higher-level token, run to a
    /// fixpoint after replacers.
    Grouper,
    /// Matches a run of tokens once, invokes a conversion callback, and
    /// deletes the consumed tokens without replacing them. The only kind
    /// that emits [`Trait`]s.
    Producer,
}

/// Context handed to a producer's conversion callback: the merged groups
/// over every token it consumed, the overall span, and the original text
/// (for producers that need to look at raw characters the tokenizer threw
/// away, such as punctuation between shorthand fields).
pub struct MatchCtx<'t> {
    pub text: &'t str,
    pub span: Range,
    pub groups: Groups,
}

impl<'t> MatchCtx<'t> {
    pub fn matched_text(&self) -> &'t str {
        self.span.slice(self.text)
    }
}

/// A conversion callback. Returning an empty vec is an in-callback veto:
/// the match is discarded and the producer pass tries the next-longest
/// candidate (or the next rule) at that position instead of emitting
/// nothing for the whole match window.
///
/// `Arc` rather than `Box` so a `Rule` can be cheaply cloned out of the
/// [`crate::catalog`] -- the catalog hands out a cloned `Rule` to every
/// trait family that references a shared name, and cloning must never
/// recompile a regex or reallocate a closure.
pub type Production = Arc<dyn Fn(&MatchCtx) -> Vec<Trait> + Send + Sync>;

#[derive(Clone)]
pub struct Rule {
    pub name: &'static str,
    pub kind: RuleKind,
    pub text_pattern: Option<&'static Regex>,
    pub token_pattern: Option<TokenAtom>,
    pub production: Option<Production>,
    /// Names that, when merged into a replacer/grouper output, should
    /// accumulate into a list rather than overwrite (e.g. `side` showing
    /// up twice in one embryo count match).
    pub list_merge: &'static [&'static str],
    pub priority: u16,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .finish()
    }
}

pub fn fragment(name: &'static str, re: &'static Regex) -> Rule {
    Rule {
        name,
        kind: RuleKind::Fragment,
        text_pattern: Some(re),
        token_pattern: None,
        production: None,
        list_merge: &[],
        priority: 0,
    }
}

pub fn keyword(name: &'static str, re: &'static Regex) -> Rule {
    Rule { kind: RuleKind::Keyword, ..fragment(name, re) }
}

pub fn replacer(name: &'static str, pattern: TokenAtom) -> Rule {
    Rule {
        name,
        kind: RuleKind::Replacer,
        text_pattern: None,
        token_pattern: Some(pattern),
        production: None,
        list_merge: &[],
        priority: 0,
    }
}

pub fn replacer_merging(name: &'static str, pattern: TokenAtom, list_merge: &'static [&'static str]) -> Rule {
    Rule { list_merge, ..replacer(name, pattern) }
}

pub fn grouper(name: &'static str, pattern: TokenAtom) -> Rule {
    Rule { kind: RuleKind::Grouper, ..replacer(name, pattern) }
}

pub fn grouper_merging(name: &'static str, pattern: TokenAtom, list_merge: &'static [&'static str]) -> Rule {
    Rule { list_merge, ..grouper(name, pattern) }
}

pub fn producer(
    name: &'static str,
    pattern: TokenAtom,
    production: impl Fn(&MatchCtx) -> Vec<Trait> + Send + Sync + 'static,
) -> Rule {
    Rule {
        name,
        kind: RuleKind::Producer,
        text_pattern: None,
        token_pattern: Some(pattern),
        production: Some(Arc::new(production)),
        list_merge: &[],
        priority: 0,
    }
}

pub fn producer_with_priority(
    name: &'static str,
    pattern: TokenAtom,
    priority: u16,
    production: impl Fn(&MatchCtx) -> Vec<Trait> + Send + Sync + 'static,
) -> Rule {
    Rule { priority, ..producer(name, pattern, production) }
}
