use std::collections::HashMap;

use serde::Deserialize;

use crate::preprocess::normalize;

/// Raw override row as supplied by the external loader
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRecord {
    pub infinitive: String,
    pub tense: String,
    pub person: String,
    pub form: String,
}

/// Curated (infinitive, tense, person) -> form exceptions.
///
/// At most one form per key. When the same key is loaded twice the later
/// record replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    // infinitive -> tense -> person -> form
    forms: HashMap<String, HashMap<String, HashMap<String, String>>>,
    len: usize,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = OverrideRecord>) -> Self {
        let mut table = Self::new();
        table.extend(records);
        table
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = OverrideRecord>) {
        for record in records {
            self.insert(&record.infinitive, &record.tense, &record.person, record.form);
        }
    }

    /// Returns the replaced form, if the key was already present
    pub fn insert(
        &mut self,
        infinitive: &str,
        tense: &str,
        person: &str,
        form: impl Into<String>,
    ) -> Option<String> {
        let infinitive = normalize(infinitive);
        let (tense, person) = (tense.trim(), person.trim());
        let form = form.into().trim().to_string();
        let previous = self
            .forms
            .entry(infinitive.clone())
            .or_default()
            .entry(tense.to_string())
            .or_default()
            .insert(person.to_string(), form.clone());

        match &previous {
            Some(old) => tracing::debug!(
                "Override {}:{}:{} replaced '{}' with '{}'",
                infinitive,
                tense,
                person,
                old,
                form
            ),
            None => self.len += 1,
        }
        previous
    }

    pub fn get(&self, infinitive: &str, tense: &str, person: &str) -> Option<&str> {
        self.forms
            .get(infinitive)
            .and_then(|tenses| tenses.get(tense))
            .and_then(|persons| persons.get(person))
            .map(String::as_str)
    }

    /// Infinitives that carry at least one override
    pub fn infinitives(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    /// All (infinitive, tense, person, form) entries, unordered
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &str)> {
        self.forms.iter().flat_map(|(infinitive, tenses)| {
            tenses.iter().flat_map(move |(tense, persons)| {
                persons.iter().map(move |(person, form)| {
                    (
                        infinitive.as_str(),
                        tense.as_str(),
                        person.as_str(),
                        form.as_str(),
                    )
                })
            })
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(infinitive: &str, tense: &str, person: &str, form: &str) -> OverrideRecord {
        OverrideRecord {
            infinitive: infinitive.to_string(),
            tense: tense.to_string(),
            person: person.to_string(),
            form: form.to_string(),
        }
    }

    #[test]
    fn exact_key_lookup() {
        let table = OverrideTable::from_records(vec![
            record("ser", "presente", "yo", "soy"),
            record("ser", "presente", "tú", "eres"),
        ]);
        assert_eq!(table.get("ser", "presente", "yo"), Some("soy"));
        assert_eq!(table.get("ser", "presente", "él"), None);
        assert_eq!(table.get("ser", "pretérito", "yo"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn last_loaded_wins() {
        let mut table = OverrideTable::from_records(vec![record("ir", "presente", "yo", "vo")]);
        table.extend(vec![record("ir", "presente", "yo", "voy")]);
        assert_eq!(table.get("ir", "presente", "yo"), Some("voy"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn keys_and_forms_are_stored_trimmed() {
        let mut table = OverrideTable::new();
        assert_eq!(table.insert(" Ser ", " presente", "yo ", " soy\n"), None);
        assert_eq!(table.get("ser", "presente", "yo"), Some("soy"));
        assert_eq!(
            table.insert("ser", "presente", "yo", "  soy  "),
            Some("soy".to_string())
        );
        assert_eq!(table.iter().next(), Some(("ser", "presente", "yo", "soy")));
    }
}
