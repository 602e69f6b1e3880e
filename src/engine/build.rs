use super::errors::RuleBuildError;
use super::pattern::referenced_names;
use super::rule::{Rule, RuleKind};
use std::collections::HashSet;

/// Validates a rule set at construction time: every name is unique, every
/// token name a replacer/grouper/producer pattern references resolves to
/// some other declared rule, no replacer/grouper names itself, and no
/// fragment/keyword regex can match the empty string (which would let the
/// scanner spin without advancing).
pub fn validate(rules: &[Rule]) -> Result<(), RuleBuildError> {
    if rules.is_empty() {
        return Err(RuleBuildError::EmptyRuleSet);
    }

    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.name) {
            return Err(RuleBuildError::DuplicateRuleName { name: rule.name });
        }
    }

    for rule in rules {
        if matches!(rule.kind, RuleKind::Fragment | RuleKind::Keyword) {
            if let Some(re) = rule.text_pattern {
                if re.is_match("") {
                    return Err(RuleBuildError::ZeroWidthMatch { rule: rule.name });
                }
            }
        }
    }

    for rule in rules {
        let Some(pattern) = &rule.token_pattern else { continue };
        let mut names = Vec::new();
        referenced_names(pattern, &mut names);
        for referenced in names {
            if matches!(rule.kind, RuleKind::Replacer | RuleKind::Grouper) && referenced == rule.name {
                return Err(RuleBuildError::SelfReference { rule: rule.name });
            }
            if !seen.contains(referenced) {
                return Err(RuleBuildError::UnknownTokenName {
                    rule: rule.name,
                    referenced,
                });
            }
        }
    }

    Ok(())
}
