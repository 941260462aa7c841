//! Encoding registry backed by tiktoken

use tiktoken_rs::CoreBPE;

use crate::error::TokenError;

/// A loaded encoding that can count tokens
pub trait TokenCounter: Send + Sync {
    fn name(&self) -> &str;

    fn count(&self, text: &str) -> Result<usize, TokenError>;
}

/// Enumerates encoding names and loads them by name
pub trait EncodingRegistry {
    fn names(&self) -> Vec<String>;

    fn load(&self, name: &str) -> Result<Box<dyn TokenCounter>, TokenError>;
}

const ENDOFTEXT: &str = "<|endoftext|>";
const FIM_PREFIX: &str = "<|fim_prefix|>";
const FIM_MIDDLE: &str = "<|fim_middle|>";
const FIM_SUFFIX: &str = "<|fim_suffix|>";
const ENDOFPROMPT: &str = "<|endofprompt|>";

/// Known encodings and the special tokens each one refuses in plain text.
///
/// `gpt2` shares its vocabulary with `r50k_base`.
const SCHEMES: &[(&str, &[&str])] = &[
    ("gpt2", &[ENDOFTEXT]),
    ("r50k_base", &[ENDOFTEXT]),
    ("p50k_base", &[ENDOFTEXT]),
    ("p50k_edit", &[ENDOFTEXT, FIM_PREFIX, FIM_MIDDLE, FIM_SUFFIX]),
    (
        "cl100k_base",
        &[ENDOFTEXT, FIM_PREFIX, FIM_MIDDLE, FIM_SUFFIX, ENDOFPROMPT],
    ),
    ("o200k_base", &[ENDOFTEXT, ENDOFPROMPT]),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct TiktokenRegistry;

impl TiktokenRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl EncodingRegistry for TiktokenRegistry {
    fn names(&self) -> Vec<String> {
        SCHEMES.iter().map(|(name, _)| name.to_string()).collect()
    }

    fn load(&self, name: &str) -> Result<Box<dyn TokenCounter>, TokenError> {
        let special = SCHEMES
            .iter()
            .find(|(scheme, _)| *scheme == name)
            .map(|(_, special)| *special)
            .ok_or_else(|| TokenError::UnknownScheme(name.to_string()))?;

        let bpe = match name {
            "gpt2" | "r50k_base" => tiktoken_rs::r50k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "p50k_edit" => tiktoken_rs::p50k_edit(),
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            _ => return Err(TokenError::UnknownScheme(name.to_string())),
        }
        .map_err(|e| TokenError::Load {
            scheme: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Box::new(TiktokenCounter {
            name: name.to_string(),
            bpe,
            special,
        }))
    }
}

struct TiktokenCounter {
    name: String,
    bpe: CoreBPE,
    special: &'static [&'static str],
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        &self.name
    }

    /// Special-token literals in the input are rejected rather than encoded
    fn count(&self, text: &str) -> Result<usize, TokenError> {
        if let Some(token) = self.special.iter().find(|token| text.contains(**token)) {
            return Err(TokenError::DisallowedSpecial {
                scheme: self.name.clone(),
                token: token.to_string(),
            });
        }
        Ok(self.bpe.encode_ordinary(text).len())
    }
}
