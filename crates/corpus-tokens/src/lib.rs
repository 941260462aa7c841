//! Token estimation across every known tiktoken encoding

pub mod error;
pub mod estimator;
pub mod registry;

pub use error::TokenError;
pub use estimator::{SchemeOutcome, SchemeResult, TokenEstimator, TokenReport, estimate};
pub use registry::{EncodingRegistry, TiktokenRegistry, TokenCounter};
