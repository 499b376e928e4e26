use std::path::Path;

use serde::de::DeserializeOwned;
use verbo_core::{
    ConjugationEngine, Lexicon, LoadError, OverrideRecord, OverrideTable, RuleTables, TableIssue,
    VerbRecord,
};

use crate::patterns::PatternsFile;

const VERBS_FILE: &str = "verbs.json";
const CONJUGATIONS_FILE: &str = "conjugations.json";
const PATTERNS_FILE: &str = "patterns.json";

/// Assembles the three tables, merges extra override files and audits the
/// result before handing out an engine.
#[derive(Debug, Clone)]
pub struct SpanishLoader {
    lexicon: Lexicon,
    overrides: OverrideTable,
    rules: RuleTables,
}

impl SpanishLoader {
    /// Tables compiled into the binary
    pub fn embedded() -> Result<Self, LoadError> {
        tracing::info!("Loading embedded Spanish tables...");
        Self::from_sources(
            include_str!("../data/verbs.json"),
            include_str!("../data/conjugations.json"),
            include_str!("../data/patterns.json"),
        )
    }

    /// Tables from a content directory holding the three JSON files
    pub fn from_dir(dir: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading Spanish tables from: {}", dir.display());
        Self::from_sources(
            &read(&dir.join(VERBS_FILE))?,
            &read(&dir.join(CONJUGATIONS_FILE))?,
            &read(&dir.join(PATTERNS_FILE))?,
        )
    }

    pub fn from_sources(verbs: &str, conjugations: &str, patterns: &str) -> Result<Self, LoadError> {
        let lexicon = Lexicon::from_records(parse::<Vec<VerbRecord>>(verbs)?)?;
        let overrides = OverrideTable::from_records(parse::<Vec<OverrideRecord>>(conjugations)?);
        let rules = PatternsFile::from_json(patterns)?.into_rules();

        tracing::info!(
            "Loaded {} verbs, {} override forms, {} tenses",
            lexicon.len(),
            overrides.len(),
            rules.tenses.len()
        );
        Ok(Self {
            lexicon,
            overrides,
            rules,
        })
    }

    /// Merge an override file on top; its forms win over earlier ones
    pub fn merge_overrides(mut self, path: &Path) -> Result<Self, LoadError> {
        let records: Vec<OverrideRecord> = parse(&read(path)?)?;
        tracing::info!(
            "Merging {} override forms from: {}",
            records.len(),
            path.display()
        );
        self.overrides.extend(records);
        Ok(self)
    }

    /// Audit findings for the tables assembled so far
    pub fn issues(&self) -> Vec<TableIssue> {
        verbo_core::audit::check_tables(&self.lexicon, &self.overrides, &self.rules)
    }

    /// Run the table audit and build the engine.
    ///
    /// Non-fatal issues are logged and left to degrade individual forms;
    /// any fatal one fails the load.
    pub fn finish(self) -> Result<ConjugationEngine, LoadError> {
        let (fatal, warnings): (Vec<_>, Vec<_>) =
            self.issues().into_iter().partition(|issue| issue.is_fatal());

        for issue in &warnings {
            tracing::warn!("Table issue: {}", issue);
        }
        if !fatal.is_empty() {
            for issue in &fatal {
                tracing::error!("Table issue: {}", issue);
            }
            return Err(LoadError::InvalidTables(fatal));
        }

        Ok(ConjugationEngine::new(self.lexicon, self.overrides, self.rules))
    }

    pub fn load_embedded() -> Result<ConjugationEngine, LoadError> {
        Self::embedded()?.finish()
    }

    pub fn load_from_dir(dir: &Path) -> Result<ConjugationEngine, LoadError> {
        Self::from_dir(dir)?.finish()
    }

    /// Content directory when given, embedded tables otherwise, then every
    /// extra override file in order.
    pub fn assemble<P: AsRef<Path>>(
        content_dir: Option<&Path>,
        override_paths: &[P],
    ) -> Result<Self, LoadError> {
        let mut loader = match content_dir {
            Some(dir) => Self::from_dir(dir)?,
            None => Self::embedded()?,
        };
        for path in override_paths {
            loader = loader.merge_overrides(path.as_ref())?;
        }
        Ok(loader)
    }

    pub fn load<P: AsRef<Path>>(
        content_dir: Option<&Path>,
        override_paths: &[P],
    ) -> Result<ConjugationEngine, LoadError> {
        Self::assemble(content_dir, override_paths)?.finish()
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, LoadError> {
    Ok(serde_json::from_str(json)?)
}
