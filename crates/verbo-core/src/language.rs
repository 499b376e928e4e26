use std::fmt;

use serde::Serialize;

use crate::error::{ConjugationError, GenerationError};
use crate::lexicon::Lexicon;

/// Conjugation interface consumed by drills and other front ends
pub trait Conjugator: Send + Sync {
    /// Known verbs
    fn lexicon(&self) -> &Lexicon;

    /// Ordered person list
    fn persons(&self) -> &[String];

    /// Resolve a single (infinitive, tense, person) form
    fn conjugate_form(
        &self,
        infinitive: &str,
        tense: &str,
        person: &str,
    ) -> Result<ConjugatedForm, ConjugationError>;

    /// Display label and explanation for a tense
    fn tense_info(&self, tense: &str) -> TenseInfo;

    /// Display label for a person
    fn person_label(&self, person: &str) -> String;
}

/// Where a surface form came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum FormSource {
    Override,
    Generated,
    /// Generation hit a table gap; the form is the bare infinitive
    #[serde(serialize_with = "serialize_display")]
    Fallback(GenerationError),
}

fn serialize_display<S: serde::Serializer>(
    error: &GenerationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugatedForm {
    pub form: String,
    pub source: FormSource,
}

impl ConjugatedForm {
    pub fn overridden(form: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            source: FormSource::Override,
        }
    }

    pub fn generated(form: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            source: FormSource::Generated,
        }
    }

    pub fn fallback(infinitive: impl Into<String>, reason: GenerationError) -> Self {
        Self {
            form: infinitive.into(),
            source: FormSource::Fallback(reason),
        }
    }

    /// 1.0 for curated or generated forms, 0.0 for the degraded placeholder
    pub fn confidence(&self) -> f32 {
        match self.source {
            FormSource::Override | FormSource::Generated => 1.0,
            FormSource::Fallback(_) => 0.0,
        }
    }

    pub fn is_confident(&self) -> bool {
        !matches!(self.source, FormSource::Fallback(_))
    }
}

impl fmt::Display for ConjugatedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.form)
    }
}

/// Every person's form for one verb and tense, in table person order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugationTable {
    pub infinitive: String,
    pub tense: String,
    pub forms: Vec<(String, ConjugatedForm)>,
}

impl ConjugationTable {
    pub fn get(&self, person: &str) -> Option<&ConjugatedForm> {
        self.forms
            .iter()
            .find(|(p, _)| p == person)
            .map(|(_, form)| form)
    }

    pub fn is_confident(&self) -> bool {
        self.forms.iter().all(|(_, form)| form.is_confident())
    }
}

/// Result of `conjugate` with or without a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Conjugation {
    Single(ConjugatedForm),
    Table(ConjugationTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_correct: bool,
    pub expected: String,
    pub provided: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenseInfo {
    pub label: String,
    pub explanation: String,
}
