use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Unknown encoding: {0}")]
    UnknownScheme(String),

    #[error("Failed to load encoding {scheme}: {reason}")]
    Load { scheme: String, reason: String },

    #[error("Text contains disallowed special token {token} for encoding {scheme}")]
    DisallowedSpecial { scheme: String, token: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
