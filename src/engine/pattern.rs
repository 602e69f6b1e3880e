//! The token-level pattern DSL used by replacer, grouper and producer rules.
//!
//! Fragment and keyword rules match raw text with an ordinary [`regex::Regex`].
//! Everything downstream of the scanner instead matches a *sequence of
//! already-produced tokens*, naming them by the rule that produced them
//! (`key`, `pair`, `shorthand`, ...). `TokenAtom` is a small, typed stand-in
//! for the regex-over-token-names syntax the reference parsers write as
//! plain strings (`"key (?P<units> len_units) pair"`); building it as Rust
//! values instead of parsing a string at runtime keeps rule declarations
//! type-checked and keeps capture names out of stringly-typed territory.

use super::token::{Groups, Token};

#[derive(Debug, Clone)]
pub enum TokenAtom {
    /// Matches one token whose `rule_name` equals this name.
    Name(&'static str),
    /// Matches one token whose `rule_name` is any of these names.
    AnyOf(Vec<&'static str>),
    /// Binds the raw text spanned by the wrapped atom under `name`, in
    /// addition to whatever groups its constituent tokens already carry.
    Capture(&'static str, Box<TokenAtom>),
    /// Zero-or-more (`max = None`) or bounded (`max = Some(n)`) repetition.
    Repeat(Box<TokenAtom>, usize, Option<usize>),
    /// First alternative that matches wins (declaration order), matching
    /// `regex`'s leftmost-first semantics rather than POSIX longest-match.
    Alt(Vec<TokenAtom>),
    Seq(Vec<TokenAtom>),
}

pub fn tok(name: &'static str) -> TokenAtom {
    TokenAtom::Name(name)
}

pub fn any_of(names: &[&'static str]) -> TokenAtom {
    TokenAtom::AnyOf(names.to_vec())
}

pub fn cap(name: &'static str, atom: TokenAtom) -> TokenAtom {
    TokenAtom::Capture(name, Box::new(atom))
}

pub fn opt(atom: TokenAtom) -> TokenAtom {
    TokenAtom::Repeat(Box::new(atom), 0, Some(1))
}

pub fn star(atom: TokenAtom) -> TokenAtom {
    TokenAtom::Repeat(Box::new(atom), 0, None)
}

pub fn plus(atom: TokenAtom) -> TokenAtom {
    TokenAtom::Repeat(Box::new(atom), 1, None)
}

pub fn rep(atom: TokenAtom, min: usize, max: usize) -> TokenAtom {
    TokenAtom::Repeat(Box::new(atom), min, Some(max))
}

pub fn alt(atoms: Vec<TokenAtom>) -> TokenAtom {
    TokenAtom::Alt(atoms)
}

pub fn seq(atoms: Vec<TokenAtom>) -> TokenAtom {
    TokenAtom::Seq(atoms)
}

/// A single way of matching an atom starting at some token index: how far
/// it consumed (exclusive end index) and the capture bindings it produced.
struct PartialMatch {
    end: usize,
    groups: Groups,
}

/// Every referenced name across an atom tree, used for build-time
/// validation (unknown-token and self-reference checks).
pub fn referenced_names(atom: &TokenAtom, out: &mut Vec<&'static str>) {
    match atom {
        TokenAtom::Name(n) => out.push(n),
        TokenAtom::AnyOf(names) => out.extend(names.iter().copied()),
        TokenAtom::Capture(_, inner) => referenced_names(inner, out),
        TokenAtom::Repeat(inner, _, _) => referenced_names(inner, out),
        TokenAtom::Alt(items) | TokenAtom::Seq(items) => {
            for item in items {
                referenced_names(item, out);
            }
        }
    }
}

/// Returns every way `atom` can match starting at `tokens[start]`, text
/// used to bind capture raw spans. Non-deterministic: callers pick whichever
/// candidate (by consumed length, then declaration order) they want.
fn match_atom(atom: &TokenAtom, tokens: &[Token], start: usize, text: &str) -> Vec<PartialMatch> {
    match atom {
        TokenAtom::Name(name) => {
            if let Some(t) = tokens.get(start) {
                if t.rule_name == *name {
                    return vec![PartialMatch { end: start + 1, groups: t.groups.clone() }];
                }
            }
            vec![]
        }
        TokenAtom::AnyOf(names) => {
            if let Some(t) = tokens.get(start) {
                if names.contains(&t.rule_name) {
                    return vec![PartialMatch { end: start + 1, groups: t.groups.clone() }];
                }
            }
            vec![]
        }
        TokenAtom::Capture(name, inner) => match_atom(inner, tokens, start, text)
            .into_iter()
            .map(|m| {
                let mut groups = m.groups;
                let span_start = tokens[start].range.start;
                let span_end = tokens[m.end - 1].range.end;
                groups.push(name, text[span_start..span_end].to_string());
                PartialMatch { end: m.end, groups }
            })
            .collect(),
        TokenAtom::Repeat(inner, min, max) => {
            repeat_matches(inner, tokens, start, text, *min, *max)
        }
        TokenAtom::Alt(items) => {
            let mut out = Vec::new();
            for item in items {
                out.extend(match_atom(item, tokens, start, text));
            }
            out
        }
        TokenAtom::Seq(items) => match_seq(items, tokens, start, text),
    }
}

fn repeat_matches(
    inner: &TokenAtom,
    tokens: &[Token],
    start: usize,
    text: &str,
    min: usize,
    max: Option<usize>,
) -> Vec<PartialMatch> {
    // Greedy expansion: grow one repetition at a time, keeping every depth
    // that is still within bounds so callers can pick the longest overall
    // sequence match later.
    let mut frontier = vec![PartialMatch { end: start, groups: Groups::new() }];
    let mut results = Vec::new();
    if min == 0 {
        results.push(PartialMatch { end: start, groups: Groups::new() });
    }
    let mut count = 0usize;
    loop {
        if let Some(m) = max {
            if count >= m {
                break;
            }
        }
        let mut next_frontier = Vec::new();
        for pm in &frontier {
            for step in match_atom(inner, tokens, pm.end, text) {
                if step.end == pm.end {
                    // zero-width repetition body; stop to avoid looping forever
                    continue;
                }
                let mut groups = pm.groups.clone();
                groups.merge_from(&step.groups, &[]);
                next_frontier.push(PartialMatch { end: step.end, groups });
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        count += 1;
        if count >= min {
            results.extend(next_frontier.iter().map(|m| PartialMatch {
                end: m.end,
                groups: m.groups.clone(),
            }));
        }
        frontier = next_frontier;
    }
    results
}

fn match_seq(items: &[TokenAtom], tokens: &[Token], start: usize, text: &str) -> Vec<PartialMatch> {
    match items.split_first() {
        None => vec![PartialMatch { end: start, groups: Groups::new() }],
        Some((head, rest)) => {
            let mut out = Vec::new();
            for head_match in match_atom(head, tokens, start, text) {
                for tail_match in match_seq(rest, tokens, head_match.end, text) {
                    let mut groups = head_match.groups.clone();
                    groups.merge_from(&tail_match.groups, &[]);
                    out.push(PartialMatch { end: tail_match.end, groups });
                }
            }
            out
        }
    }
}

/// Every distinct end index (and its merged groups) that `atom` can reach
/// starting at `start`, sorted so the longest match comes first.
pub fn candidates(atom: &TokenAtom, tokens: &[Token], start: usize, text: &str) -> Vec<(usize, Groups)> {
    let mut matches: Vec<_> = match_atom(atom, tokens, start, text)
        .into_iter()
        .map(|m| (m.end, m.groups))
        .collect();
    matches.sort_by(|a, b| b.0.cmp(&a.0));
    matches
}
