//! Output writers (§6's "the CLI can emit CSV or JSON"): flatten a record's
//! traits into a row of named columns, or serialize them as a JSON array.
//!
//! Grounded in `pylib/vertnet/writers/csv_formatters/gonad_state.py`, which
//! dedups same-kind values and writes one column per distinct value using
//! an ordinal suffix (`gonads_1st_state`, `gonads_2nd_state`, ...) rather
//! than overwriting a single column when a record mentions the same trait
//! kind more than once; `ordinal()` below matches `traiter/util.py`'s
//! digit-to-ordinal-word helper (backed there by the `inflect` package).

use crate::trait_model::Trait;
use std::collections::BTreeMap;

/// One flattened output row: ordered column name -> value.
pub type Row = BTreeMap<String, String>;

/// Flattens one record's traits into a single CSV-ready row.
///
/// Every trait kind that occurs more than once in `traits` gets one column
/// per distinct value it took, suffixed with an ordinal
/// (`sex`, `sex_2nd` for a second distinct `sex` mention; matches the
/// reference writer's `{kind}_{ordinal}` naming, simplified to a bare
/// `{kind}` for the first occurrence since most records only mention a
/// trait once).
pub fn to_csv_row(traits: &[Trait]) -> Row {
    let mut seen_values: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    let mut row = Row::new();

    for t in traits {
        let display = display_value(t);
        let values = seen_values.entry(t.kind).or_default();
        if values.contains(&display) {
            continue;
        }
        let column = if values.is_empty() { t.kind.to_string() } else { format!("{}_{}", t.kind, ordinal(values.len() + 1)) };
        row.insert(column, display.clone());
        values.push(display);
    }

    row
}

/// Writes `rows` as CSV, column set taken from the union of every row's
/// keys so records with different trait combinations still share a header.
pub fn write_csv<W: std::io::Write>(writer: W, rows: &[Row]) -> csv::Result<()> {
    let mut columns: Vec<String> = rows.iter().flat_map(|row| row.keys().cloned()).collect();
    columns.sort_unstable();
    columns.dedup();

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&columns)?;
    for row in rows {
        let record: Vec<&str> = columns.iter().map(|c| row.get(c).map(String::as_str).unwrap_or("")).collect();
        out.write_record(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Serializes `traits` as a JSON array, one object per trait with every
/// field [`Trait`] carries (kind, span, value, units, flags).
pub fn to_json(traits: &[Trait]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(traits)
}

fn display_value(t: &Trait) -> String {
    if let Some(text) = &t.value_text {
        return text.clone();
    }
    match &t.value {
        crate::trait_model::TraitValue::Number(n) => format!("{n}"),
        crate::trait_model::TraitValue::Pair(a, b) => format!("{a},{b}"),
        crate::trait_model::TraitValue::None => String::new(),
    }
}

/// Converts a 1-based count to its English ordinal word: 1 -> "1st",
/// 2 -> "2nd", 3 -> "3rd", 4 -> "4th", 11/12/13 -> "11th"/"12th"/"13th".
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::token::Range;
    use crate::trait_model::TraitValue;

    fn t(kind: &'static str, text: &str) -> Trait {
        Trait::new(kind, Range::new(0, 1), TraitValue::None).with_text(text)
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
    }

    #[test]
    fn repeated_kind_gets_ordinal_suffixed_columns() {
        let traits = vec![t("gonads_state", "enlarged"), t("gonads_state", "scrotal")];
        let row = to_csv_row(&traits);
        assert_eq!(row.get("gonads_state").map(String::as_str), Some("enlarged"));
        assert_eq!(row.get("gonads_state_2nd").map(String::as_str), Some("scrotal"));
    }

    #[test]
    fn duplicate_value_is_not_repeated() {
        let traits = vec![t("sex", "female"), t("sex", "female")];
        let row = to_csv_row(&traits);
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("sex").map(String::as_str), Some("female"));
    }

    #[test]
    fn csv_writer_unions_columns_across_rows() {
        let rows = vec![to_csv_row(&[t("sex", "female")]), to_csv_row(&[t("life_stage", "adult")])];
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("life_stage,sex"));
    }

    #[test]
    fn json_round_trips_kind_and_value_text() {
        let traits = vec![t("sex", "female")];
        let json = to_json(&traits).unwrap();
        assert!(json.contains("\"kind\": \"sex\""));
        assert!(json.contains("\"female\""));
    }
}
