use serde::Serialize;
use std::collections::HashMap;

/// A half-open byte offset range into the original input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn join(a: Range, b: Range) -> Range {
        Range::new(a.start.min(b.start), a.end.max(b.end))
    }

    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// A single named capture's value. Repeated captures of the same name
/// within one match (e.g. two `side` groups in an embryo count) collapse
/// into a list rather than overwriting each other.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupValue {
    One(String),
    Many(Vec<String>),
}

impl GroupValue {
    pub fn first(&self) -> &str {
        match self {
            GroupValue::One(s) => s,
            GroupValue::Many(v) => v.first().map(|s| s.as_str()).unwrap_or(""),
        }
    }

    pub fn as_list(&self) -> Vec<&str> {
        match self {
            GroupValue::One(s) => vec![s.as_str()],
            GroupValue::Many(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }
}

/// The named-capture bag carried by a [`Token`], merged from whatever
/// constituent tokens a replacer/grouper/producer rule consumed.
///
/// Merge rule: setting a name that already exists overwrites it
/// (rightmost constituent wins), matching the reference implementation's
/// `dict.update()` semantics over chained token groups. A rule that wants
/// to *accumulate* instead of overwrite (e.g. a producer with two `side`
/// captures) uses [`Groups::push`], which always appends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups(HashMap<&'static str, GroupValue>);

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.insert(name, GroupValue::One(value.into()));
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.get_mut(name) {
            Some(GroupValue::One(existing)) => {
                let existing = std::mem::take(existing);
                self.0.insert(name, GroupValue::Many(vec![existing, value]));
            }
            Some(GroupValue::Many(list)) => list.push(value),
            None => {
                self.0.insert(name, GroupValue::One(value));
            }
        }
    }

    /// Merge constituent groups into `self`. Every key from `other` overwrites
    /// any key already present, unless `name` is listed in `list_merge`, in
    /// which case values accumulate instead.
    pub fn merge_from(&mut self, other: &Groups, list_merge: &[&'static str]) {
        for (name, value) in other.0.iter() {
            if list_merge.contains(name) {
                for v in value.as_list() {
                    self.push(name, v.to_string());
                }
            } else {
                self.0.insert(name, value.clone());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|v| v.first())
    }

    pub fn get_list(&self, name: &str) -> Vec<&str> {
        self.0.get(name).map(|v| v.as_list()).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// A span produced either directly by the scanner (from a fragment/keyword
/// regex) or by a replacer/grouper collapsing a run of earlier tokens.
///
/// `rule_name` is the name of the rule that produced this token; later
/// passes match against it by equality, so it doubles as the token's
/// grammatical "kind".
#[derive(Debug, Clone)]
pub struct Token {
    pub rule_name: &'static str,
    pub range: Range,
    pub groups: Groups,
}

impl Token {
    pub fn new(rule_name: &'static str, range: Range, groups: Groups) -> Self {
        Self { rule_name, range, groups }
    }

    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        self.range.slice(text)
    }
}
