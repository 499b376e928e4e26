use crate::audit::TableIssue;

/// Failures surfaced to callers of the conjugation engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConjugationError {
    #[error("Verb not found: {0}")]
    VerbNotFound(String),
}

/// Rule-table gaps hit while generating a form.
///
/// These never abort a conjugation request. The engine degrades to the bare
/// infinitive and records the gap on the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("No regular endings for ending class '{0}'")]
    UnknownEndingClass(String),

    #[error("No suffix for tense '{tense}', person '{person}' in ending class '{class}'")]
    UnknownTenseOrPerson {
        class: String,
        tense: String,
        person: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid tables: {}", format_issues(.0))]
    InvalidTables(Vec<TableIssue>),
}

fn format_issues(issues: &[TableIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
