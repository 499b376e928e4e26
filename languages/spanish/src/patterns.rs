use std::collections::HashMap;

use serde::Deserialize;
use verbo_core::rules::EndingTable;
use verbo_core::{OrthographicRule, RuleTables, StemChange};

use crate::rules::{
    INFINITIVE_STEM_TENSES, STEM_CHANGE_PERSONS, STEM_CHANGE_TENSES, default_orthographic_rules,
    default_stem_changes,
};

/// On-disk shape of `patterns.json`.
///
/// The rule families are optional; when absent the Spanish defaults apply.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternsFile {
    pub persons: Vec<String>,
    pub tenses: Vec<String>,
    pub regular_endings: EndingTable,
    #[serde(default)]
    pub tense_labels: HashMap<String, String>,
    #[serde(default)]
    pub tense_explanations: HashMap<String, String>,
    #[serde(default)]
    pub person_labels: HashMap<String, String>,

    #[serde(default)]
    pub stem_changes: Option<Vec<StemChange>>,
    #[serde(default)]
    pub stem_change_persons: Option<Vec<String>>,
    #[serde(default)]
    pub stem_change_tenses: Option<Vec<String>>,
    #[serde(default)]
    pub infinitive_stem_tenses: Option<Vec<String>>,
    #[serde(default)]
    pub orthographic_rules: Option<Vec<OrthographicRule>>,
}

impl PatternsFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn into_rules(self) -> RuleTables {
        RuleTables {
            persons: self.persons,
            tenses: self.tenses,
            regular_endings: self.regular_endings,
            stem_changes: self.stem_changes.unwrap_or_else(default_stem_changes),
            stem_change_persons: self
                .stem_change_persons
                .unwrap_or_else(|| owned(&STEM_CHANGE_PERSONS)),
            stem_change_tenses: self
                .stem_change_tenses
                .unwrap_or_else(|| owned(&STEM_CHANGE_TENSES)),
            infinitive_stem_tenses: self
                .infinitive_stem_tenses
                .unwrap_or_else(|| owned(&INFINITIVE_STEM_TENSES)),
            orthographic_rules: self
                .orthographic_rules
                .unwrap_or_else(default_orthographic_rules),
            tense_labels: self.tense_labels,
            tense_explanations: self.tense_explanations,
            person_labels: self.person_labels,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
