use super::pattern::candidates;
use super::rule::{MatchCtx, Rule};
use super::token::{Range, Token};
use crate::trait_model::Trait;

/// One pass over the (now fully replaced/grouped) token stream, trying
/// producer rules at every position. Candidates are tried longest-match
/// first, then in declaration order; a callback returning an empty vec is
/// treated as an in-callback veto and the next candidate is tried rather
/// than giving up on the whole position. A position with no surviving
/// producer match is simply skipped -- nothing downstream reads leftover
/// tokens once production has run.
pub fn apply_producer_pass(rules: &[&Rule], tokens: &[Token], text: &str) -> Vec<Trait> {
    let mut traits = Vec::new();
    let mut i = 0;

    'positions: while i < tokens.len() {
        let mut ranked: Vec<(usize, usize, usize)> = Vec::new(); // (end, -priority as usize trick, rule_idx)
        for (rule_idx, rule) in rules.iter().enumerate() {
            let Some(pattern) = &rule.token_pattern else { continue };
            for (end, _groups) in candidates(pattern, tokens, i, text) {
                ranked.push((end, rule.priority as usize, rule_idx));
            }
        }
        // Longest match first; among equal length, highest declared priority;
        // remaining ties broken by declaration order.
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));

        for (end, _priority, rule_idx) in ranked {
            if end <= i {
                continue;
            }
            let rule = rules[rule_idx];
            let pattern = rule.token_pattern.as_ref().expect("producer rules always have a pattern");
            let Some((matched_end, groups)) = candidates(pattern, tokens, i, text)
                .into_iter()
                .find(|(e, _)| *e == end)
            else {
                continue;
            };
            let span = Range::join(tokens[i].range, tokens[matched_end - 1].range);
            let mut merged = crate::engine::token::Groups::new();
            for t in &tokens[i..matched_end] {
                merged.merge_from(&t.groups, &[]);
            }
            // Captures are applied last so an explicit `(?P<units> ...)`-style
            // binding wins over a same-named group a constituent token
            // happened to carry internally.
            merged.merge_from(&groups, &[]);
            let ctx = MatchCtx { text, span, groups: merged };
            let produced = rule
                .production
                .as_ref()
                .expect("producer rules always have a production callback")(&ctx);
            if !produced.is_empty() {
                traits.extend(produced);
                i = matched_end;
                continue 'positions;
            }
        }

        i += 1;
    }

    traits
}
