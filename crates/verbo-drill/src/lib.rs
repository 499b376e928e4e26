pub mod error;
pub mod generator;
pub mod question;
pub mod session;

pub use error::DrillError;
pub use generator::{DrillGenerator, DrillSettings, OPTION_COUNT};
pub use question::DrillQuestion;
pub use session::{DrillMode, DrillSession, DrillSummary};
