//! Stacked-regex biological trait extraction.
//!
//! Extracts structured trait measurements -- body mass, total/tail/hind-foot/
//! ear length, sex, life stage, gonad state and size, and reproductive data
//! (placental scars, embryos, lactation, nipples, pregnancy) -- from the
//! short, noisy free-text fields found in museum specimen records.
//!
//! ```
//! let traits = traiter::parse("sex=female ?", None);
//! assert_eq!(traits.len(), 1);
//! assert_eq!(traits[0].kind, "sex");
//! assert_eq!(traits[0].value_text.as_deref(), Some("female?"));
//! ```
//!
//! See [`engine`] for the pipeline every trait family is built on, and
//! `DESIGN.md` at the repository root for where each family's vocabulary
//! and fix-up rules are grounded.

extern crate self as traiter;

#[macro_use]
mod macros;
pub mod api;
mod catalog;
mod conversion;
pub mod engine;
mod rules;
mod shorthand;
pub mod trait_model;
pub mod units;
pub mod writers;

pub use api::{Context, Options, Parser, parse, parse_with};
pub use engine::RuleBuildError;
pub use trait_model::{Dimension, MeasuredFrom, Side, Trait, TraitValue};
