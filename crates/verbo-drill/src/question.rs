use serde::Serialize;
use uuid::Uuid;
use verbo_core::preprocess::normalize;

/// A multiple-choice item. `correct_form` is kept apart from `options`
/// so scoring never depends on display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillQuestion {
    pub id: Uuid,
    pub verb: String,
    pub verb_english: String,
    pub tense: String,
    pub person: String,
    pub prompt: String,
    pub correct_form: String,
    pub options: Vec<String>,
}

impl DrillQuestion {
    pub fn is_correct(&self, answer: &str) -> bool {
        normalize(answer) == normalize(&self.correct_form)
    }

    /// Position of the correct form in `options`
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_form)
    }
}
