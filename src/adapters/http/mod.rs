pub mod client;
pub mod server;

pub use client::{HttpClassifier, DEFAULT_MAX_RESPONSE_BYTES};
pub use server::{DivisionResult, DivisionServer, ErrorResult};
