use super::rule::Rule;
use super::token::{Groups, Range, Token};

/// Walks `text` left to right, turning it into an ordered, non-overlapping
/// stream of tokens. At each cursor position every fragment/keyword rule is
/// tried; the winner is whichever produces the earliest-starting match,
/// ties broken by declaration order (mirroring the reference scanner's
/// single combined alternation, where an earlier alternative wins a tie).
/// Characters no rule recognizes -- punctuation, connective words -- are
/// simply dropped between tokens rather than represented.
pub fn scan(rules: &[Rule], text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    while cursor <= text.len() {
        let mut winner: Option<(usize, usize, usize, regex::Captures)> = None;

        for (idx, rule) in rules.iter().enumerate() {
            let Some(re) = rule.text_pattern else { continue };
            let Some(caps) = re.captures_at(text, cursor) else { continue };
            let m = caps.get(0).expect("capture group 0 always matches");
            let candidate_start = m.start();
            let candidate_end = m.end();
            let better = match &winner {
                None => true,
                Some((best_start, _, best_idx, _)) => {
                    candidate_start < *best_start
                        || (candidate_start == *best_start && idx < *best_idx)
                }
            };
            if better {
                winner = Some((candidate_start, candidate_end, idx, caps));
            }
        }

        let Some((start, end, idx, caps)) = winner else { break };
        let rule = &rules[idx];
        let mut groups = Groups::new();
        for name in re_capture_names(rule) {
            if let Some(m) = caps.name(name) {
                groups.set(name, m.as_str().to_string());
            }
        }
        tokens.push(Token::new(rule.name, Range::new(start, end), groups));
        cursor = if end > start { end } else { start + 1 };
    }

    tokens
}

fn re_capture_names(rule: &Rule) -> Vec<&'static str> {
    let Some(re): Option<&'static regex::Regex> = rule.text_pattern else { return Vec::new() };
    re.capture_names().flatten().collect()
}
