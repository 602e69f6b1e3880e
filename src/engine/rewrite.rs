use super::pattern::candidates;
use super::rule::Rule;
use super::token::{Groups, Range, Token};

const MAX_ITERATIONS: usize = 64;

/// One left-to-right sweep over `tokens`: at each position, every rule is
/// tried and the longest match wins (ties broken by declaration order);
/// its consumed tokens collapse into one new token named after the rule.
/// Positions with no match pass through unchanged. `text` is needed
/// because `TokenAtom::Capture` atoms bind raw spans of the original input.
pub fn apply_rewrite_pass(rules: &[&Rule], tokens: &[Token], text: &str) -> (Vec<Token>, bool) {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    let mut changed = false;

    while i < tokens.len() {
        let mut best: Option<(usize, usize, Groups)> = None;
        for (rule_idx, rule) in rules.iter().enumerate() {
            let Some(pattern) = &rule.token_pattern else { continue };
            for (end, groups) in candidates(pattern, tokens, i, text) {
                let is_better = match &best {
                    None => true,
                    Some((best_end, best_idx, _)) => {
                        end > *best_end || (end == *best_end && rule_idx < *best_idx)
                    }
                };
                if is_better {
                    best = Some((end, rule_idx, groups));
                }
                break; // candidates() is pre-sorted longest-first per rule
            }
        }

        match best {
            Some((end, rule_idx, groups)) if end > i => {
                let rule = rules[rule_idx];
                let span = Range::join(tokens[i].range, tokens[end - 1].range);
                let mut merged = Groups::new();
                for t in &tokens[i..end] {
                    merged.merge_from(&t.groups, rule.list_merge);
                }
                merged.merge_from(&groups, rule.list_merge);
                out.push(Token::new(rule.name, span, merged));
                i = end;
                changed = true;
            }
            _ => {
                out.push(tokens[i].clone());
                i += 1;
            }
        }
    }

    (out, changed)
}

/// Runs `apply_rewrite_pass` until it stops changing the stream, or the
/// iteration cap is hit. The build-time DAG check rejects self-referencing
/// replacer/grouper rules, so the cap should never actually bind.
pub fn run_to_fixpoint(rules: &[&Rule], tokens: Vec<Token>, text: &str) -> Vec<Token> {
    let mut current = tokens;
    for _ in 0..MAX_ITERATIONS {
        let (next, changed) = apply_rewrite_pass(rules, &current, text);
        current = next;
        if !changed {
            break;
        }
    }
    current
}
