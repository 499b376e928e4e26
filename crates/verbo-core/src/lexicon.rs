use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::preprocess::{last_chars, normalize};

/// Inflectional class, from the infinitive's last two letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbGroup {
    Ar,
    Er,
    Ir,
}

impl VerbGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerbGroup::Ar => "ar",
            VerbGroup::Er => "er",
            VerbGroup::Ir => "ir",
        }
    }

    /// Ending class of an infinitive, if it is one of the recognized endings
    pub fn of_infinitive(infinitive: &str) -> Option<Self> {
        last_chars(infinitive, 2).and_then(|ending| ending.parse().ok())
    }
}

impl FromStr for VerbGroup {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" => Ok(VerbGroup::Ar),
            "er" => Ok(VerbGroup::Er),
            "ir" => Ok(VerbGroup::Ir),
            other => Err(LoadError::InvalidFormat(format!(
                "unknown verb group '{other}'"
            ))),
        }
    }
}

impl fmt::Display for VerbGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexicon entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verb {
    pub infinitive: String,
    pub english: String,
    pub group: VerbGroup,
    pub irregular: bool,
    pub tags: BTreeSet<String>,
}

impl Verb {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Raw lexicon row as supplied by the external loader
#[derive(Debug, Clone, Deserialize)]
pub struct VerbRecord {
    pub infinitive: String,
    #[serde(default)]
    pub english: String,
    pub group: String,
    #[serde(default)]
    pub irregular: String,
    /// Comma-joined
    #[serde(default)]
    pub tags: String,
}

impl TryFrom<VerbRecord> for Verb {
    type Error = LoadError;

    fn try_from(record: VerbRecord) -> Result<Self, Self::Error> {
        let infinitive = normalize(&record.infinitive);
        let group: VerbGroup = record.group.parse()?;

        if VerbGroup::of_infinitive(&infinitive) != Some(group) {
            return Err(LoadError::InvalidFormat(format!(
                "infinitive '{infinitive}' does not end in -{group}"
            )));
        }

        let irregular = match record.irregular.trim().to_lowercase().as_str() {
            "yes" | "true" => true,
            "no" | "false" | "" => false,
            other => {
                return Err(LoadError::InvalidFormat(format!(
                    "irregular flag '{other}' for '{infinitive}'"
                )));
            }
        };

        Ok(Verb {
            infinitive,
            english: record.english.trim().to_string(),
            group,
            irregular,
            tags: split_tags(&record.tags).into_iter().collect(),
        })
    }
}

/// Split a comma-joined tag list, dropping blanks
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Retrieval criteria; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerbFilter {
    pub group: Option<VerbGroup>,
    pub irregular: Option<bool>,
    /// Verb must carry at least one of these (OR semantics). Empty = no constraint.
    pub tags: Vec<String>,
}

impl VerbFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(mut self, group: VerbGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn irregular(mut self, irregular: bool) -> Self {
        self.irregular = Some(irregular);
        self
    }

    /// Comma-separated tag set
    pub fn tags(mut self, tags: &str) -> Self {
        self.tags = split_tags(tags);
        self
    }

    pub fn matches(&self, verb: &Verb) -> bool {
        self.group.is_none_or(|group| verb.group == group)
            && self.irregular.is_none_or(|irregular| verb.irregular == irregular)
            && (self.tags.is_empty() || verb.has_any_tag(&self.tags))
    }
}

/// The set of known verbs, in load order
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    verbs: Vec<Verb>,
    index: HashMap<String, usize>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from verbs; a repeated infinitive replaces the earlier entry in place
    pub fn from_verbs(verbs: impl IntoIterator<Item = Verb>) -> Self {
        let mut lexicon = Self::new();
        for verb in verbs {
            lexicon.insert(verb);
        }
        lexicon
    }

    pub fn from_records(records: Vec<VerbRecord>) -> Result<Self, LoadError> {
        let verbs = records
            .into_iter()
            .map(Verb::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_verbs(verbs))
    }

    /// Returns the replaced entry, if any
    pub fn insert(&mut self, verb: Verb) -> Option<Verb> {
        match self.index.get(&verb.infinitive) {
            Some(&idx) => {
                tracing::debug!("Replacing lexicon entry for '{}'", verb.infinitive);
                Some(std::mem::replace(&mut self.verbs[idx], verb))
            }
            None => {
                self.index.insert(verb.infinitive.clone(), self.verbs.len());
                self.verbs.push(verb);
                None
            }
        }
    }

    /// Exact match on the lowercased infinitive
    pub fn lookup(&self, infinitive: &str) -> Option<&Verb> {
        self.index
            .get(&normalize(infinitive))
            .and_then(|&idx| self.verbs.get(idx))
    }

    pub fn contains(&self, infinitive: &str) -> bool {
        self.lookup(infinitive).is_some()
    }

    pub fn filter(&self, criteria: &VerbFilter) -> Vec<&Verb> {
        self.verbs.iter().filter(|v| criteria.matches(v)).collect()
    }

    /// Up to `n` matching verbs in random order. Returns every match when fewer than `n` exist.
    pub fn sample_random<R: Rng + ?Sized>(
        &self,
        n: usize,
        criteria: &VerbFilter,
        rng: &mut R,
    ) -> Vec<&Verb> {
        let mut matches = self.filter(criteria);
        matches.shuffle(rng);
        matches.truncate(n);
        matches
    }

    /// Case-insensitive substring search over English glosses
    pub fn find_by_english(&self, query: &str) -> Vec<&Verb> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.verbs
            .iter()
            .filter(|v| v.english.to_lowercase().contains(&query))
            .collect()
    }

    pub fn is_irregular(&self, infinitive: &str) -> bool {
        self.lookup(infinitive).is_some_and(|v| v.irregular)
    }

    pub fn verb_group(&self, infinitive: &str) -> Option<VerbGroup> {
        self.lookup(infinitive).map(|v| v.group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verb> {
        self.verbs.iter()
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}
