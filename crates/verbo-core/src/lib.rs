pub mod audit;
pub mod engine;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod overrides;
pub mod preprocess;
pub mod rules;

pub use audit::TableIssue;
pub use engine::ConjugationEngine;
pub use error::{ConjugationError, GenerationError, LoadError};
pub use language::{
    ConjugatedForm, Conjugation, ConjugationTable, Conjugator, FormSource, TenseInfo, Validation,
};
pub use lexicon::{Lexicon, Verb, VerbFilter, VerbGroup, VerbRecord};
pub use overrides::{OverrideRecord, OverrideTable};
pub use rules::{MutationSite, OrthographicRule, RuleTables, StemChange};
