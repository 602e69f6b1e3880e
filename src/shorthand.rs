//! Shorthand decoder (component 8): the positional `TL-TaL-HFL-EL[:WT[unit]]`
//! notation museum collectors write instead of spelling out each
//! measurement, e.g. `"123-45-20-18:9.2g"`.
//!
//! Grounded in `pylib/vertnet/shared_patterns.py`'s `shorthand`/`triple`
//! fragments. The reference implementation relies on a regex backreference
//! (`(?P=shorthand_sep)`) to require the *same* separator at each boundary;
//! `regex` (the crate, not the reference's `regex` PyPI package) supports
//! neither backreferences nor lookaround, so this fragment accepts any of
//! `:`, `/`, `-` independently at each boundary instead of pinning one for
//! the whole run. Real-world shorthand is written with a consistent
//! separator in practice, so this is a loosening rather than a correctness
//! hole; it is the only place this crate's vocabulary diverges from the
//! source grammar rather than just approximating an assertion with `\b`.

use crate::conversion;
use crate::engine::Groups;
use crate::regex;
use regex::Regex;

// A shorthand slot value (`SH_VAL` in the reference grammar) is a number,
// an unknown marker (`?`, `??`, `x`, `xx`), or `n/d`/`nd`; inlined into each
// pattern below as `\d+(?:\.\d+)?|[?x]{1,2}|n/?d`.

pub fn shorthand_regex() -> &'static Regex {
    regex!(
        r"(?i)(?P<estimated_tl>\[)?(?P<shorthand_tl>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?[:/-](?P<estimated_tal>\[)?(?P<shorthand_tal>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?[:/-](?P<estimated_hfl>\[)?(?P<shorthand_hfl>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?[:/-](?P<estimated_el>\[)?(?P<shorthand_el>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?(?P<shorthand_ext>(?:[:/-][a-z]{1,4}(?:\d+(?:\.\d+)?|[?x]{1,2}|n/?d))*)(?:[\s=:/-]+(?P<estimated_wt>\[)?\s*(?P<shorthand_wt>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?\s*(?P<shorthand_wt_units>kilograms?|kgs?\.?|milligrams?|mgs?\.?|grams?|gm?s?\.?|lbs?\.?|pounds?|ozs?\.?|ounces?)?)?"
    )
}

/// A "triple" is shorthand missing its fourth (ear length) slot, e.g.
/// `"123-45-20"`. Kept separate from `shorthand_regex` so a parser can
/// choose to accept it only where an ear-length slot genuinely might be
/// absent (total/tail/hind-foot length parsers), never as a source of
/// ear-length data itself.
pub fn triple_regex() -> &'static Regex {
    regex!(
        r"(?i)(?P<estimated_tl>\[)?(?P<shorthand_tl>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?[:/-](?P<estimated_tal>\[)?(?P<shorthand_tal>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?[:/-](?P<estimated_hfl>\[)?(?P<shorthand_hfl>\d+(?:\.\d+)?|[?x]{1,2}|n/?d)\]?"
    )
}

/// One decoded shorthand slot.
pub struct SlotValue {
    pub value: f64,
    pub estimated: bool,
}

/// The four (or five, with weight) labelled positions a shorthand match
/// can carry. `shorthand_length` in the reference implementation takes the
/// field name as a string (`'shorthand_tl'`, ...); this enum keeps the same
/// shape but typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    TotalLength,
    TailLength,
    HindFootLength,
    EarLength,
    Weight,
}

impl Slot {
    fn names(self) -> (&'static str, &'static str) {
        match self {
            Slot::TotalLength => ("shorthand_tl", "estimated_tl"),
            Slot::TailLength => ("shorthand_tal", "estimated_tal"),
            Slot::HindFootLength => ("shorthand_hfl", "estimated_hfl"),
            Slot::EarLength => ("shorthand_el", "estimated_el"),
            Slot::Weight => ("shorthand_wt", "estimated_wt"),
        }
    }
}

fn is_unknown(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "?" | "??" | "x" | "xx" | "n/d" | "nd")
}

/// Extracts one labelled slot from a shorthand match's captured groups.
/// Returns `None` when the slot is absent, or written as one of shorthand's
/// unknown markers (`?`, `x`, `n/d`).
pub fn shorthand_length(groups: &Groups, slot: Slot) -> Option<SlotValue> {
    let (value_name, estimated_name) = slot.names();
    let raw = groups.get(value_name)?;
    if is_unknown(raw) {
        return None;
    }
    let value = conversion::to_float(raw)?;
    Some(SlotValue { value, estimated: groups.contains(estimated_name) })
}

/// Extension slots (`fa22`, `hb66`, ...) trailing the four core
/// measurements, e.g. in `"11-22-33-44-fa55-hb66:99g"`. Returns
/// `(label, value)` pairs in the order they appear; parsed directly from
/// the raw extension blob rather than via named captures, since the
/// extension can repeat an unbounded number of times and `regex` rejects
/// duplicate capture-group names across a pattern.
pub fn extensions(groups: &Groups) -> Vec<(String, f64)> {
    let Some(blob) = groups.get("shorthand_ext") else { return Vec::new() };
    let re = regex!(r"(?i)[:/-]([a-z]{1,4})(\d+(?:\.\d+)?|[?x]{1,2}|n/?d)");
    re.captures_iter(blob)
        .filter_map(|c| {
            let label = c.get(1)?.as_str().to_ascii_lowercase();
            let raw = c.get(2)?.as_str();
            if is_unknown(raw) {
                return None;
            }
            conversion::to_float(raw).map(|v| (label, v))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scanner::scan;
    use crate::engine::fragment;

    fn scan_shorthand(text: &str) -> Groups {
        let rules = vec![fragment("shorthand", shorthand_regex())];
        let tokens = scan(&rules, text);
        tokens.into_iter().find(|t| t.rule_name == "shorthand").expect("shorthand should match").groups
    }

    #[test]
    fn decodes_four_slots_and_weight() {
        let groups = scan_shorthand("123-45-20-18:9.2g");
        let tl = shorthand_length(&groups, Slot::TotalLength).unwrap();
        assert_eq!(tl.value, 123.0);
        assert!(!tl.estimated);

        let tal = shorthand_length(&groups, Slot::TailLength).unwrap();
        assert_eq!(tal.value, 45.0);

        let hfl = shorthand_length(&groups, Slot::HindFootLength).unwrap();
        assert_eq!(hfl.value, 20.0);

        let el = shorthand_length(&groups, Slot::EarLength).unwrap();
        assert_eq!(el.value, 18.0);

        let wt = shorthand_length(&groups, Slot::Weight).unwrap();
        assert_eq!(wt.value, 9.2);
        assert_eq!(groups.get("shorthand_wt_units"), Some("g"));
    }

    #[test]
    fn bracketed_slot_is_estimated() {
        let groups = scan_shorthand("11-[22]-33-[44]:9g");
        let tal = shorthand_length(&groups, Slot::TailLength).unwrap();
        assert!(tal.estimated);
        let el = shorthand_length(&groups, Slot::EarLength).unwrap();
        assert!(el.estimated);
    }

    #[test]
    fn unknown_marker_is_absent() {
        let groups = scan_shorthand("11-x-33-44");
        assert!(shorthand_length(&groups, Slot::TailLength).is_none());
    }

    #[test]
    fn parses_extension_fields() {
        let groups = scan_shorthand("11-22-33-44-fa55-hb66:9g");
        let ext = extensions(&groups);
        assert_eq!(ext, vec![("fa".to_string(), 55.0), ("hb".to_string(), 66.0)]);
    }
}
