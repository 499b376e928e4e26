mod drill_tests;
mod loader_tests;

use std::sync::OnceLock;

use verbo_core::ConjugationEngine;

use crate::SpanishLoader;

/// The embedded tables, loaded once per test binary
pub(crate) fn engine() -> &'static ConjugationEngine {
    static ENGINE: OnceLock<ConjugationEngine> = OnceLock::new();
    ENGINE.get_or_init(|| SpanishLoader::load_embedded().expect("embedded tables load"))
}

pub(crate) fn form(infinitive: &str, tense: &str, person: &str) -> String {
    engine()
        .conjugate_form(infinitive, tense, person)
        .unwrap()
        .form
}
