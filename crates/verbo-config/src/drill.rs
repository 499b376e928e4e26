use std::env;

use serde::{Deserialize, Serialize};

fn default_tenses() -> Vec<String> {
    vec![
        "presente".to_string(),
        "pretérito".to_string(),
        "imperfecto".to_string(),
    ]
}

fn default_tags() -> String {
    "basic,common,core".to_string()
}

fn default_max_distractor_attempts() -> usize {
    24
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Tenses questions are drawn from
    #[serde(default = "default_tenses")]
    pub tenses: Vec<String>,
    /// Comma-joined; a verb qualifies with any one of them
    #[serde(default = "default_tags")]
    pub tags: String,
    /// Random person draws per question before falling back to a full sweep
    #[serde(default = "default_max_distractor_attempts")]
    pub max_distractor_attempts: usize,
    /// Fixed RNG seed for reproducible drills
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            tenses: default_tenses(),
            tags: default_tags(),
            max_distractor_attempts: default_max_distractor_attempts(),
            seed: None,
        }
    }
}

impl DrillConfig {
    pub fn new() -> Self {
        let tags = env::var("VERBO_DRILL_TAGS").unwrap_or_else(|_| default_tags());

        let seed = env::var("VERBO_SEED").ok().and_then(|v| v.parse().ok());

        Self {
            tags,
            seed,
            ..Self::default()
        }
    }
}
