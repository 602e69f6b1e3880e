/// Compiles a regex literal exactly once and hands back a `&'static Regex`.
///
/// Every fragment/keyword rule constructor uses this so that the same
/// pattern, declared at the same call site, is shared across however many
/// times a [`crate::engine::TraitParser`] gets rebuilt (tests build fresh
/// parsers constantly).
#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
