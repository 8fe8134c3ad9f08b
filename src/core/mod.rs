pub mod queue;
pub mod runner;

pub use crate::domain::model::{ClassificationResult, RunSummary, Tag};
pub use crate::domain::ports::{Classifier, ResultSink};
pub use crate::utils::error::Result;
