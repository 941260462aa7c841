//! Corpus building for token estimation
//!
//! This crate contains:
//! - Tolerant text decoding for source files
//! - Boilerplate marker extraction
//! - The size-bounded corpus builder

pub mod builder;
pub mod decode;
pub mod error;
pub mod markers;

pub use builder::{
    BuildOptions, BuildSummary, CorpusBuilder, DELIMITER, EntryOrder, build, is_corpus_input,
};
pub use decode::decode_lossy;
pub use error::{CorpusError, Result};
pub use markers::Markers;
