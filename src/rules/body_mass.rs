//! `body_mass` trait family: a single weight measurement, keyed phrase or
//! shorthand weight slot, normalized to grams. Supports the compound
//! English "N lb M oz" notation the same way the shorthand and length
//! families handle compound units.
//!
//! Grounded in `traiter/traits/body_mass_trait.py` and
//! `pylib/vertnet/parsers/shorthand_mass.py`.

use crate::catalog;
use crate::conversion;
use crate::engine::errors::RuleBuildError;
use crate::engine::pattern::{any_of, cap, opt, seq, tok};
use crate::engine::rule::MatchCtx;
use crate::engine::{Rule, TraitParser, keyword, producer};
use crate::regex;
use crate::shorthand::{self, Slot};
use crate::trait_model::{Trait, TraitValue};

pub fn build() -> Result<TraitParser, RuleBuildError> {
    let rules: Vec<Rule> = vec![
        catalog::get("uuid"),
        catalog::get("shorthand"),
        catalog::get("number"),
        // `pounds`/`ounces` declared ahead of the broader `mass_units` so the
        // scanner's same-start tie-break gives the compound producer its own
        // distinct token names instead of both collapsing into `mass_units`.
        catalog::get("pounds"),
        catalog::get("ounces"),
        catalog::get("mass_units"),
        keyword(
            "body_mass_key",
            regex!(r"(?i)\b(?:body\s+mass|weight|wt\.?|mass)\b"),
        ),
        producer(
            "body_mass_keyed",
            seq(vec![
                tok("body_mass_key"),
                cap("value", tok("number")),
                opt(cap("units", any_of(&["mass_units", "pounds", "ounces"]))),
            ]),
            |ctx| convert_simple(ctx).map(|t| vec![t]).unwrap_or_default(),
        ),
        producer(
            "body_mass_compound",
            seq(vec![
                tok("body_mass_key"),
                cap("lbs", tok("number")),
                tok("pounds"),
                cap("oz", tok("number")),
                tok("ounces"),
            ]),
            convert_compound,
        ),
        producer("body_mass_shorthand", cap("value", tok("shorthand")), |ctx| {
            convert_shorthand(ctx).map(|t| vec![t]).unwrap_or_default()
        }),
    ];
    TraitParser::build("body_mass", rules)
}

fn convert_simple(ctx: &MatchCtx) -> Option<Trait> {
    let raw = ctx.groups.get("value")?;
    let number = conversion::to_float(raw)?;
    let t = Trait::new("body_mass", ctx.span, TraitValue::Number(number));
    Some(match ctx.groups.get("units").and_then(|u| conversion::convert_mass_g(number, u)) {
        Some((grams, label)) => Trait { value: TraitValue::Number(grams), ..t }.with_units(label, false),
        None => t.with_units("g", true),
    })
}

fn convert_compound(ctx: &MatchCtx) -> Vec<Trait> {
    let Some(lbs_raw) = ctx.groups.get("lbs") else { return Vec::new() };
    let Some(oz_raw) = ctx.groups.get("oz") else { return Vec::new() };
    let (Some(lbs), Some(oz)) = (conversion::to_float(lbs_raw), conversion::to_float(oz_raw)) else {
        return Vec::new();
    };
    let grams = crate::units::lbs_oz_to_grams(lbs, oz);
    vec![Trait::new("body_mass", ctx.span, TraitValue::Number(grams)).with_units("lb_oz", false)]
}

fn convert_shorthand(ctx: &MatchCtx) -> Option<Trait> {
    let slot = shorthand::shorthand_length(&ctx.groups, Slot::Weight)?;
    let (grams, _) = match ctx.groups.get("shorthand_wt_units") {
        Some(unit) => conversion::convert_mass_g(slot.value, unit).unwrap_or((slot.value, "g")),
        None => (slot.value, "g"),
    };
    Some(
        Trait::new("body_mass", ctx.span, TraitValue::Number(grams))
            .with_units("g_shorthand", false)
            .with_estimated(slot.estimated),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_mass_with_explicit_units() {
        let parser = build().unwrap();
        let traits = parser.parse("body mass=45 g");
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Number(45.0));
        assert_eq!(traits[0].units, Some("g"));
    }

    #[test]
    fn compound_pounds_and_ounces_convert_to_grams() {
        let parser = build().unwrap();
        let traits = parser.parse("weight 2 lbs 3 oz");
        assert_eq!(traits.len(), 1);
        let expected = crate::units::lbs_oz_to_grams(2.0, 3.0);
        assert_eq!(traits[0].value, TraitValue::Number(expected));
        assert_eq!(traits[0].units, Some("lb_oz"));
    }

    #[test]
    fn shorthand_weight_slot() {
        let parser = build().unwrap();
        let traits = parser.parse(r#"{"measurements":"192-84-31-19=38g" }"#);
        assert_eq!(traits.len(), 1);
        assert_eq!(traits[0].value, TraitValue::Number(38.0));
        assert_eq!(traits[0].units, Some("g_shorthand"));
    }
}
