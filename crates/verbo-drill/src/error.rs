use verbo_core::ConjugationError;

#[derive(Debug, thiserror::Error)]
pub enum DrillError {
    #[error("No verbs match the drill criteria")]
    EmptyPool,

    #[error("No tenses configured for drills")]
    NoTenses,

    #[error("Rule tables list no persons")]
    NoPersons,

    #[error("No verb/tense in the pool has {needed} distinct confident forms")]
    NotEnoughForms { needed: usize },

    #[error("Drill already finished")]
    Finished,

    #[error("Option {index} is out of range")]
    InvalidChoice { index: usize },

    #[error(transparent)]
    Conjugation(#[from] ConjugationError),
}
