use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::preprocess::{drop_chars, fold_accents, last_chars, normalize};

/// ending class -> tense -> person -> suffix
pub type EndingTable = HashMap<String, HashMap<String, HashMap<String, String>>>;

/// Which occurrence of the mutating vowel changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationSite {
    First,
    #[default]
    Last,
}

/// A named vowel mutation and the closed set of infinitives it applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemChange {
    pub name: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub site: MutationSite,
    pub verbs: BTreeSet<String>,
}

impl StemChange {
    pub fn new<I, S>(name: &str, from: &str, to: &str, site: MutationSite, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            site,
            verbs: verbs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn applies_to(&self, infinitive: &str) -> bool {
        self.verbs.contains(infinitive)
    }

    /// Mutate the stem; a stem without the vowel comes back unchanged
    pub fn apply(&self, stem: &str) -> String {
        let found = match self.site {
            MutationSite::First => stem.find(&self.from),
            MutationSite::Last => stem.rfind(&self.from),
        };
        match found {
            Some(idx) if !self.from.is_empty() => format!(
                "{}{}{}",
                &stem[..idx],
                self.to,
                &stem[idx + self.from.len()..]
            ),
            _ => stem.to_string(),
        }
    }
}

/// Spelling adjustment keyed on the infinitive's ending.
///
/// When the infinitive ends in `infinitive_suffix`, the tense is in `tenses`
/// and the person in `persons` (an empty list matches any), the last `drop`
/// characters of the stem are replaced by `append`. If `after` is set, the
/// character just before the dropped part must be one of its characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrthographicRule {
    pub name: String,
    pub infinitive_suffix: String,
    #[serde(default)]
    pub tenses: Vec<String>,
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub drop: usize,
    #[serde(default)]
    pub append: String,
}

impl OrthographicRule {
    pub fn new(name: &str, infinitive_suffix: &str, drop: usize, append: &str) -> Self {
        Self {
            name: name.to_string(),
            infinitive_suffix: infinitive_suffix.to_string(),
            tenses: Vec::new(),
            persons: Vec::new(),
            after: None,
            drop,
            append: append.to_string(),
        }
    }

    pub fn in_tenses(mut self, tenses: &[&str]) -> Self {
        self.tenses = tenses.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn for_persons(mut self, persons: &[&str]) -> Self {
        self.persons = persons.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn after(mut self, letters: &str) -> Self {
        self.after = Some(letters.to_string());
        self
    }

    pub fn matches(&self, infinitive: &str, stem: &str, tense: &str, person: &str) -> bool {
        infinitive.ends_with(&self.infinitive_suffix)
            && (self.tenses.is_empty() || self.tenses.iter().any(|t| t == tense))
            && (self.persons.is_empty() || self.persons.iter().any(|p| p == person))
            && self.guard_holds(stem)
    }

    fn guard_holds(&self, stem: &str) -> bool {
        let Some(letters) = &self.after else {
            return true;
        };
        drop_chars(stem, self.drop)
            .chars()
            .next_back()
            .is_some_and(|c| letters.contains(c))
    }

    pub fn apply(&self, stem: &str) -> String {
        format!("{}{}", drop_chars(stem, self.drop), self.append)
    }
}

/// Immutable conjugation rules, loaded once and shared read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    pub persons: Vec<String>,
    pub tenses: Vec<String>,
    pub regular_endings: EndingTable,

    pub stem_changes: Vec<StemChange>,
    /// Stress-bearing persons; the only ones that mutate
    pub stem_change_persons: Vec<String>,
    /// Present-tense family
    pub stem_change_tenses: Vec<String>,
    /// Tenses built on the whole infinitive (future, conditional)
    pub infinitive_stem_tenses: Vec<String>,
    /// Evaluated in order, first match applies
    pub orthographic_rules: Vec<OrthographicRule>,

    pub tense_labels: HashMap<String, String>,
    pub tense_explanations: HashMap<String, String>,
    pub person_labels: HashMap<String, String>,
}

impl RuleTables {
    /// Ending-class key for an infinitive: its last two characters
    pub fn ending_class(infinitive: &str) -> Option<&str> {
        last_chars(infinitive, 2)
    }

    pub fn suffix(&self, class: &str, tense: &str, person: &str) -> Option<&str> {
        self.regular_endings
            .get(class)
            .and_then(|tenses| tenses.get(tense))
            .and_then(|persons| persons.get(person))
            .map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.regular_endings.contains_key(class)
    }

    /// First stem-change set claiming this infinitive
    pub fn stem_change_for(&self, infinitive: &str) -> Option<&StemChange> {
        self.stem_changes.iter().find(|sc| sc.applies_to(infinitive))
    }

    pub fn mutates(&self, tense: &str, person: &str) -> bool {
        self.stem_change_tenses.iter().any(|t| t == tense)
            && self.stem_change_persons.iter().any(|p| p == person)
    }

    pub fn uses_infinitive_stem(&self, tense: &str) -> bool {
        self.infinitive_stem_tenses.iter().any(|t| t == tense)
    }

    pub fn orthographic_rule_for(
        &self,
        infinitive: &str,
        stem: &str,
        tense: &str,
        person: &str,
    ) -> Option<&OrthographicRule> {
        self.orthographic_rules
            .iter()
            .find(|rule| rule.matches(infinitive, stem, tense, person))
    }

    /// Canonical tense key for user input such as `"Presente"` or `"preterito"`.
    /// Unknown input is returned as given.
    pub fn tense_key<'a>(&'a self, tense: &'a str) -> &'a str {
        canonical_key(&self.tenses, tense).unwrap_or(tense)
    }

    /// Canonical person key, so `"tu"` and `"Tú"` both select `"tú"`
    pub fn person_key<'a>(&'a self, person: &'a str) -> &'a str {
        canonical_key(&self.persons, person).unwrap_or(person)
    }

    pub fn tense_label<'a>(&'a self, tense: &'a str) -> &'a str {
        let tense = self.tense_key(tense);
        self.tense_labels
            .get(tense)
            .map(String::as_str)
            .unwrap_or(tense)
    }

    pub fn tense_explanation(&self, tense: &str) -> &str {
        self.tense_explanations
            .get(self.tense_key(tense))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn person_label<'a>(&'a self, person: &'a str) -> &'a str {
        let person = self.person_key(person);
        self.person_labels
            .get(person)
            .map(String::as_str)
            .unwrap_or(person)
    }
}

/// Exact match after normalizing wins over a match with accents folded away
fn canonical_key<'a>(keys: &'a [String], input: &str) -> Option<&'a str> {
    let wanted = normalize(input);
    if let Some(key) = keys.iter().find(|k| normalize(k) == wanted) {
        return Some(key.as_str());
    }
    let folded = fold_accents(&wanted);
    keys.iter()
        .find(|k| fold_accents(k) == folded)
        .map(String::as_str)
}
