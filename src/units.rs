//! Unit normalization: every length trait reports millimeters, every mass
//! trait reports grams. Conversion factors are ported directly from the
//! reference implementation's `UNITS` table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Millimeters per unit of length.
pub static LENGTH_MM: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("mm", 1.0),
        ("millimeter", 1.0),
        ("millimeters", 1.0),
        ("cm", 10.0),
        ("centimeter", 10.0),
        ("centimeters", 10.0),
        ("m", 1000.0),
        ("meter", 1000.0),
        ("meters", 1000.0),
        ("ft", 304.8),
        ("feet", 304.8),
        ("foot", 304.8),
        ("in", 25.4),
        ("inch", 25.4),
        ("inches", 25.4),
    ])
});

/// Grams per unit of mass.
pub static MASS_G: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("g", 1.0),
        ("gram", 1.0),
        ("grams", 1.0),
        ("gm", 1.0),
        ("kg", 1000.0),
        ("kilogram", 1000.0),
        ("kilograms", 1000.0),
        ("mg", 0.001),
        ("milligram", 0.001),
        ("milligrams", 0.001),
        ("lb", 453.593),
        ("lbs", 453.593),
        ("pound", 453.593),
        ("pounds", 453.593),
        ("oz", 28.349),
        ("ozs", 28.349),
        ("ounce", 28.349),
        ("ounces", 28.349),
    ])
});

fn normalize_unit(unit: &str) -> String {
    unit.trim().to_ascii_lowercase().trim_end_matches('.').to_string()
}

/// Converts `value` in `unit` to millimeters. Returns `None` for an
/// unrecognized unit rather than silently assuming millimeters -- callers
/// that want a default should do so explicitly (see `units_inferred`).
pub fn to_mm(value: f64, unit: &str) -> Option<f64> {
    LENGTH_MM.get(normalize_unit(unit).as_str()).map(|factor| value * factor)
}

/// Converts `value` in `unit` to grams.
pub fn to_grams(value: f64, unit: &str) -> Option<f64> {
    MASS_G.get(normalize_unit(unit).as_str()).map(|factor| value * factor)
}

/// Feet-and-inches compound length, e.g. "4 ft 9 in", converted to millimeters.
pub fn feet_inches_to_mm(feet: f64, inches: f64) -> f64 {
    feet * LENGTH_MM["ft"] + inches * LENGTH_MM["in"]
}

/// Pounds-and-ounces compound mass, e.g. "4 lbs 9 ozs", converted to grams.
pub fn lbs_oz_to_grams(lbs: f64, oz: f64) -> f64 {
    lbs * MASS_G["lb"] + oz * MASS_G["oz"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_common_length_units() {
        assert_eq!(to_mm(1.0, "cm"), Some(10.0));
        assert_eq!(to_mm(2.0, "in"), Some(50.8));
        assert_eq!(to_mm(1.0, "mm"), Some(1.0));
    }

    #[test]
    fn unknown_unit_is_none() {
        assert_eq!(to_mm(1.0, "furlongs"), None);
    }

    #[test]
    fn compound_units_sum_components() {
        assert!((feet_inches_to_mm(1.0, 6.0) - (304.8 + 6.0 * 25.4)).abs() < 1e-9);
        assert!((lbs_oz_to_grams(4.0, 9.0) - (4.0 * 453.593 + 9.0 * 28.349)).abs() < 1e-9);
    }
}
