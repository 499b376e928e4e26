pub mod loader;
pub mod patterns;
pub mod rules;

pub use loader::SpanishLoader;
pub use patterns::PatternsFile;
pub use rules::{default_orthographic_rules, default_stem_changes};

#[cfg(test)]
mod tests;
