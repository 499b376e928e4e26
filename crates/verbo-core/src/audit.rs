use std::collections::BTreeSet;

use crate::lexicon::Lexicon;
use crate::overrides::OverrideTable;
use crate::rules::RuleTables;

/// A table authoring problem found at load time
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum TableIssue {
    #[error("'{infinitive}' is claimed by stem-change sets '{first}' and '{second}'")]
    DuplicateStemChange {
        infinitive: String,
        first: String,
        second: String,
    },

    #[error("override references unknown verb '{infinitive}'")]
    UnknownOverrideVerb { infinitive: String },

    #[error("'{infinitive}' has no regular endings for class '{class}'")]
    UnknownEndingClass { infinitive: String, class: String },

    #[error("class '{class}' has no suffix for tense '{tense}', person '{person}'")]
    MissingSuffix {
        class: String,
        tense: String,
        person: String,
    },
}

impl TableIssue {
    /// Fatal issues must stop the load; the rest only degrade individual forms
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TableIssue::DuplicateStemChange { .. } | TableIssue::UnknownOverrideVerb { .. }
        )
    }
}

/// Validate the three tables against each other. Issues come back sorted.
pub fn check_tables(
    lexicon: &Lexicon,
    overrides: &OverrideTable,
    rules: &RuleTables,
) -> Vec<TableIssue> {
    let mut issues = BTreeSet::new();

    for (i, first) in rules.stem_changes.iter().enumerate() {
        for second in &rules.stem_changes[i + 1..] {
            for infinitive in first.verbs.intersection(&second.verbs) {
                issues.insert(TableIssue::DuplicateStemChange {
                    infinitive: infinitive.clone(),
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }
    }

    for infinitive in overrides.infinitives() {
        if !lexicon.contains(infinitive) {
            issues.insert(TableIssue::UnknownOverrideVerb {
                infinitive: infinitive.to_string(),
            });
        }
    }

    for verb in lexicon.iter() {
        let class = RuleTables::ending_class(&verb.infinitive).unwrap_or_default();
        if !rules.has_class(class) {
            issues.insert(TableIssue::UnknownEndingClass {
                infinitive: verb.infinitive.clone(),
                class: class.to_string(),
            });
        }
    }

    for class in rules.regular_endings.keys() {
        for tense in &rules.tenses {
            for person in &rules.persons {
                if rules.suffix(class, tense, person).is_none() {
                    issues.insert(TableIssue::MissingSuffix {
                        class: class.clone(),
                        tense: tense.clone(),
                        person: person.clone(),
                    });
                }
            }
        }
    }

    issues.into_iter().collect()
}
