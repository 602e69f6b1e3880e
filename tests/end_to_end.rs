//! Integration tests exercising the public `traiter::parse` entry point
//! across every registered trait family at once, rather than one family's
//! rule set in isolation (see `src/rules/*.rs` for per-family unit tests).

use traiter::{MeasuredFrom, Trait, TraitValue};

fn find<'a>(traits: &'a [Trait], kind: &str) -> Option<&'a Trait> {
    traits.iter().find(|t| t.kind == kind)
}

#[test]
fn sex_with_hedge() {
    let traits = traiter::parse("sex=female ?", None);
    assert_eq!(traits.len(), 1);
    assert_eq!(traits[0].kind, "sex");
    assert_eq!(traits[0].value_text.as_deref(), Some("female?"));
}

#[test]
fn total_tail_hind_foot_length_triple() {
    let text = "total length=180 mm; tail length=82 mm; hind foot=28";
    let traits = traiter::parse(text, None);

    let total = find(&traits, "total_length").expect("total_length");
    assert_eq!(total.value, TraitValue::Number(180.0));
    assert_eq!(total.units, Some("mm"));
    assert!(!total.units_inferred);

    let tail = find(&traits, "tail_length").expect("tail_length");
    assert_eq!(tail.value, TraitValue::Number(82.0));

    let hind_foot = find(&traits, "hind_foot_length").expect("hind_foot_length");
    assert_eq!(hind_foot.value, TraitValue::Number(28.0));
    assert!(hind_foot.units_inferred);
}

#[test]
fn shorthand_blob_yields_four_lengths_and_a_mass() {
    let text = r#"{"measurements":"192-84-31-19=38g" }"#;
    let traits = traiter::parse(text, None);

    assert_eq!(find(&traits, "total_length").unwrap().value, TraitValue::Number(192.0));
    assert_eq!(find(&traits, "tail_length").unwrap().value, TraitValue::Number(84.0));
    assert_eq!(find(&traits, "hind_foot_length").unwrap().value, TraitValue::Number(31.0));
    assert_eq!(find(&traits, "ear_length").unwrap().value, TraitValue::Number(19.0));
    assert_eq!(find(&traits, "body_mass").unwrap().value, TraitValue::Number(38.0));
}

#[test]
fn ear_length_measured_from_notch_converts_inches_to_mm() {
    let traits = traiter::parse("ear from notch=.25 in", None);
    let ear = find(&traits, "ear_length").expect("ear_length");
    assert!((ear.value.as_single().unwrap() - 6.35).abs() < 0.01);
    assert_eq!(ear.units, Some("in"));
    assert_eq!(ear.measured_from, Some(MeasuredFrom::Notch));
}

#[test]
fn testes_descended_state_and_cross_size() {
    let text = "reproductive data=Testes descended, 5x3 mm";
    let traits = traiter::parse(text, None);

    let state = find(&traits, "testes_state").expect("testes_state");
    assert_eq!(state.value_text.as_deref(), Some("descended"));

    let size = find(&traits, "testes_size").expect("testes_size");
    assert_eq!(size.value, TraitValue::Pair(5.0, 3.0));
    assert_eq!(size.units, Some("mm"));
}

#[test]
fn age_determined_by_sided_die_is_vetoed() {
    let traits = traiter::parse("age determined by 20-sided die", None);
    assert!(find(&traits, "life_stage").is_none());
}

#[test]
fn a_full_specimen_record_produces_a_coherent_span_ordered_set() {
    let text = "adult male, sex=male, total length=210 mm, tail length=95 mm, hind foot=30 mm, \
                body mass=60 g, testes descended, 6x4 mm";
    let traits = traiter::parse(text, None);

    assert!(!traits.is_empty());
    for pair in traits.windows(2) {
        assert!(pair[0].start() <= pair[1].start(), "traits must be returned in span order");
    }

    assert!(find(&traits, "sex").is_some());
    assert!(find(&traits, "total_length").is_some());
    assert!(find(&traits, "body_mass").is_some());
    assert!(find(&traits, "testes_state").is_some());
    assert!(find(&traits, "testes_size").is_some());
}

#[test]
fn field_context_is_accepted_without_changing_extraction() {
    let with_field = traiter::parse("sex=female", Some("dynamicproperties"));
    let without_field = traiter::parse("sex=female", None);
    assert_eq!(with_field, without_field);
}
