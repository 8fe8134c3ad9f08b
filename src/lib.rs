pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{build_classifier, AdapterKind, AnyClassifier, HttpClassifier, MathClassifier};
pub use config::{toml_config::TomlConfig, AppConfig, RemoteSettings};
pub use core::{queue::BoundedQueue, runner::FizzBuzzRunner};
pub use domain::model::{ClassificationResult, RunSummary, Tag};
pub use domain::ports::{Classifier, ResultSink};
pub use utils::error::{FizzBuzzError, Result};
