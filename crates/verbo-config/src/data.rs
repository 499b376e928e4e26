use std::env;

use serde::{Deserialize, Serialize};

/// Where the lexicon, override and pattern tables come from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding verbs.json, conjugations.json and patterns.json.
    /// Unset means the embedded tables.
    pub content_dir: Option<String>,
    /// Extra override files merged after the main table, later files win
    pub additional_override_paths: Vec<String>,
}

impl DataConfig {
    pub fn new() -> Self {
        Self {
            content_dir: env::var("VERBO_CONTENT_DIR").ok(),
            additional_override_paths: Vec::new(),
        }
    }
}
