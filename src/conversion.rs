//! Small numeric/string coercion helpers ported from the reference
//! implementation's `shared/util.py`. Specimen text is noisy enough
//! ("ca. 23", "23+-", "23mm.") that producers lean on tolerant coercion
//! rather than a strict `str::parse`.

/// Parses a float out of a string that may carry stray non-numeric
/// characters (thousands separators, trailing units, OCR noise), by
/// stripping everything except digits and `.` before parsing, matching the
/// reference `to_float`'s `re.sub(r'[^\d.]', '', value)`. A bare `-` is not
/// a sign here: a hyphen in specimen text is a range/shorthand separator
/// ("23-5 mm"), not a negative measurement, so it is stripped like any
/// other non-numeric character rather than treated as a minus sign.
/// Returns `None` if nothing numeric remains, matching the reference
/// `to_float`'s behavior of returning `None` rather than `0.0` on failure.
pub fn to_float(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if cleaned.is_empty() || cleaned == "." {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parses an integer out of a noisy string, stripping non-digit characters
/// first. Unlike `to_float`, the reference `to_int` returns `0` rather than
/// `None` on total failure -- producers that count things (embryos, scars)
/// treat "no digits at all" as a count of zero rather than a missing value.
pub fn to_int(raw: &str) -> i64 {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    cleaned.parse::<i64>().unwrap_or(0)
}

/// Picks the first non-empty value out of a list of optional raw captures,
/// mirroring `shared/util.py`'s `as_list`/`flatten` combination used when a
/// producer declares several alternative capture names for "the value".
pub fn first_present<'a>(values: &[Option<&'a str>]) -> Option<&'a str> {
    values.iter().flatten().find(|s| !s.is_empty()).copied()
}

/// Canonicalizes a raw length-unit spelling (`"millimeters"`, `"mm."`, ...)
/// to one of the fixed `&'static str` labels [`crate::trait_model::Trait`]
/// reports, matching `convert_units`'s unit-lookup half of §4.4.
pub fn length_unit_label(raw: &str) -> Option<&'static str> {
    match raw.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
        "mm" | "millimeter" | "millimeters" => Some("mm"),
        "cm" | "centimeter" | "centimeters" => Some("cm"),
        "m" | "meter" | "meters" => Some("m"),
        "in" | "inch" | "inches" => Some("in"),
        "ft" | "foot" | "feet" => Some("ft"),
        _ => None,
    }
}

/// Canonicalizes a raw mass-unit spelling the same way [`length_unit_label`]
/// does for lengths.
pub fn mass_unit_label(raw: &str) -> Option<&'static str> {
    match raw.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
        "g" | "gram" | "grams" | "gm" | "gms" => Some("g"),
        "kg" | "kilogram" | "kilograms" => Some("kg"),
        "mg" | "milligram" | "milligrams" => Some("mg"),
        "lb" | "lbs" | "pound" | "pounds" => Some("lb"),
        "oz" | "ozs" | "ounce" | "ounces" => Some("oz"),
        _ => None,
    }
}

/// Converts a raw length value + unit spelling to millimeters, returning
/// the value alongside the unit's canonical label. `None` for a unit
/// `convert_units` doesn't recognize.
pub fn convert_length_mm(value: f64, raw_unit: &str) -> Option<(f64, &'static str)> {
    let label = length_unit_label(raw_unit)?;
    let mm = crate::units::to_mm(value, raw_unit)?;
    Some((mm, label))
}

/// Converts a raw mass value + unit spelling to grams, returning the value
/// alongside the unit's canonical label.
pub fn convert_mass_g(value: f64, raw_unit: &str) -> Option<(f64, &'static str)> {
    let label = mass_unit_label(raw_unit)?;
    let g = crate::units::to_grams(value, raw_unit)?;
    Some((g, label))
}

/// `A x B` (or `A by B`) becomes a two-element pair; a lone `A` stays a
/// scalar. Mirrors `shared_reproductive_patterns.py`'s `cross` shape
/// (§4.4's `cross`).
pub fn cross(a: f64, b: Option<f64>) -> crate::trait_model::TraitValue {
    match b {
        Some(b) => crate::trait_model::TraitValue::Pair(a, b),
        None => crate::trait_model::TraitValue::Number(a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_float_strips_noise() {
        assert_eq!(to_float("23mm"), Some(23.0));
        assert_eq!(to_float("ca. 23.5"), Some(23.5));
        assert_eq!(to_float("mm"), None);
    }

    #[test]
    fn to_float_strips_hyphen_rather_than_treating_it_as_a_sign() {
        assert_eq!(to_float("23-5 mm"), Some(235.0));
        assert_eq!(to_float("-23.5"), Some(23.5));
    }

    #[test]
    fn to_int_defaults_to_zero() {
        assert_eq!(to_int("3 embryos"), 3);
        assert_eq!(to_int("none"), 0);
    }
}
