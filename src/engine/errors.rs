use std::fmt;

/// Errors caught when a [`crate::engine::parser::TraitParser`] is built,
/// before a single byte of input is ever scanned. The reference Python
/// parsers let bad rule declarations blow up as `KeyError`s at runtime;
/// catching them at build time instead means a malformed trait module
/// fails its own construction rather than silently dropping matches.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleBuildError {
    /// A replacer/grouper/producer pattern named a token that no declared
    /// fragment, keyword, replacer or grouper rule produces.
    UnknownTokenName { rule: &'static str, referenced: &'static str },
    /// A replacer or grouper rule's pattern refers to its own name,
    /// which would make its own output an input to itself.
    SelfReference { rule: &'static str },
    /// Two rules were declared with the same name.
    DuplicateRuleName { name: &'static str },
    /// A fragment or keyword regex can match the empty string, which
    /// would let the scanner spin in place forever.
    ZeroWidthMatch { rule: &'static str },
    /// The rule set contained no rules at all.
    EmptyRuleSet,
}

impl fmt::Display for RuleBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleBuildError::UnknownTokenName { rule, referenced } => write!(
                f,
                "rule `{rule}` references unknown token name `{referenced}`"
            ),
            RuleBuildError::SelfReference { rule } => {
                write!(f, "rule `{rule}` references its own output name")
            }
            RuleBuildError::DuplicateRuleName { name } => {
                write!(f, "duplicate rule name `{name}`")
            }
            RuleBuildError::ZeroWidthMatch { rule } => {
                write!(f, "rule `{rule}`'s pattern can match an empty string")
            }
            RuleBuildError::EmptyRuleSet => write!(f, "rule set is empty"),
        }
    }
}

impl std::error::Error for RuleBuildError {}
