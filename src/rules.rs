//! Trait parser assembly (component 9): every concrete trait family lives
//! in its own file here, each declaring a rule list against [`crate::engine`]
//! and building a [`TraitParser`]. [`all`] is the registry the top-level
//! [`crate::api::Parser`] iterates over -- one call to `TraitParser::parse`
//! per family, merged and span-sorted by the caller.
//!
//! Families that are cheap to build (no catalog sharing subtlety, no
//! cross-family ordering requirement) build independently; [`all`] panics
//! on a [`crate::engine::RuleBuildError`] because a malformed rule graph
//! here is a programming error in this crate, not a runtime condition --
//! the same posture `catalog::get` takes toward an unknown name.

#[path = "rules/body_mass.rs"]
mod body_mass;
#[path = "rules/gonads.rs"]
mod gonads;
#[path = "rules/lengths.rs"]
mod lengths;
#[path = "rules/life_stage.rs"]
mod life_stage;
#[path = "rules/reproductive.rs"]
mod reproductive;
#[path = "rules/sex.rs"]
mod sex;

use crate::engine::TraitParser;

/// Builds every trait family's parser once. Called from a `once_cell::sync::Lazy`
/// static in `api.rs` so construction (regex compilation, rule-graph
/// validation) happens a single time per process regardless of how many
/// texts are parsed.
pub fn all() -> Vec<TraitParser> {
    let mut parsers = Vec::new();
    parsers.push(sex::build().expect("sex rule graph"));
    parsers.push(life_stage::build().expect("life_stage rule graph"));
    parsers.extend(lengths::build_all().expect("length rule graphs"));
    parsers.push(body_mass::build().expect("body_mass rule graph"));
    parsers.extend(gonads::build_all().expect("gonad rule graphs"));
    parsers.extend(reproductive::build_all().expect("reproductive rule graphs"));
    parsers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_builds_and_has_a_unique_name() {
        let parsers = all();
        let mut names: Vec<&str> = parsers.iter().map(|p| p.name()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before, "duplicate trait family name in registry");
    }
}
