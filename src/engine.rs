//! Stacked-regex parsing engine.
//!
//! This module is the public entry point for the engine every trait family
//! under `src/rules/` builds on. Parsing one family's text runs a fixed
//! pipeline:
//!
//! ```text
//! text ── scan (scanner.rs) ──────────── fragment/keyword regexes win the
//!         │                              earliest, earliest-declared match
//!         v
//! tokens ── run_to_fixpoint (rewrite.rs, replacers) ── longest match wins,
//!         │                                            ties by declaration
//!         v
//! tokens ── run_to_fixpoint (rewrite.rs, groupers) ─── same algorithm,
//!         │                                            grouper rules
//!         v
//! tokens ── apply_producer_pass (produce.rs) ───────── conversion callback,
//!         │                                            empty vec = veto
//!         v
//!  traits ── fix_up (parser.rs) ──────────────────────  per-kind veto on
//!                                                        raw context window
//! ```
//!
//! Rules are declared once per trait family in `src/rules/<family>/` and
//! assembled into a [`parser::TraitParser`] via [`parser::TraitParser::build`],
//! which validates the rule dependency graph (no unknown token names, no
//! replacer/grouper naming its own output, no zero-width fragments) before
//! any text is scanned.
//!
//! ## Responsibilities by module
//!
//! - `token.rs`: the `Token`/`Groups`/`Range` types flowing through every pass.
//! - `pattern.rs`: the token-pattern DSL (`TokenAtom`) replacer/grouper/
//!   producer rules are written against, plus its matcher.
//! - `rule.rs`: `Rule`, `RuleKind`, and the five rule constructors
//!   (`fragment`, `keyword`, `replacer`, `grouper`, `producer`).
//! - `build.rs`: build-time validation of a rule set.
//! - `scanner.rs`: turns raw text into the initial token stream.
//! - `rewrite.rs`: the replacer/grouper fixpoint loop.
//! - `produce.rs`: the producer pass that emits `Trait`s.
//! - `parser.rs`: `TraitParser`, which wires the passes together.
//!
//! ## Debugging
//!
//! Set `TRAITER_DEBUG_RULES=1` to have the CLI's debug format print the
//! token stream at each pass boundary in addition to the final traits.

#[path = "engine/build.rs"]
pub mod build;
#[path = "engine/errors.rs"]
pub mod errors;
#[path = "engine/parser.rs"]
pub mod parser;
#[path = "engine/pattern.rs"]
pub mod pattern;
#[path = "engine/produce.rs"]
pub mod produce;
#[path = "engine/rewrite.rs"]
pub mod rewrite;
#[path = "engine/rule.rs"]
pub mod rule;
#[path = "engine/scanner.rs"]
pub mod scanner;
#[path = "engine/token.rs"]
pub mod token;

pub use errors::RuleBuildError;
pub use parser::{FixUp, PassTrace, TraitParser};
pub use rule::{fragment, grouper, grouper_merging, keyword, producer, producer_with_priority, replacer, replacer_merging, Rule, RuleKind};
pub use token::{GroupValue, Groups, Range, Token};
