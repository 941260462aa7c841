//! Token estimation over a complete file

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TokenError;
use crate::registry::{EncodingRegistry, TiktokenRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SchemeResult {
    Counted { tokens: usize },
    Failed { reason: String },
}

/// Token count (or failure) for one encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeOutcome {
    pub scheme: String,
    #[serde(flatten)]
    pub result: SchemeResult,
}

/// Outcomes for every encoding in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    pub outcomes: Vec<SchemeOutcome>,
}

impl TokenReport {
    /// Successful counts only
    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome.result {
                SchemeResult::Counted { tokens } => Some((outcome.scheme.as_str(), tokens)),
                SchemeResult::Failed { .. } => None,
            })
            .collect()
    }

    pub fn get(&self, scheme: &str) -> Option<usize> {
        self.counts()
            .into_iter()
            .find(|(name, _)| *name == scheme)
            .map(|(_, tokens)| tokens)
    }

    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.result {
                SchemeResult::Failed { reason } => {
                    Some((outcome.scheme.as_str(), reason.as_str()))
                }
                SchemeResult::Counted { .. } => None,
            })
            .collect()
    }
}

/// Counts tokens under every encoding a registry knows about
pub struct TokenEstimator<R = TiktokenRegistry> {
    registry: R,
}

impl TokenEstimator<TiktokenRegistry> {
    pub fn tiktoken() -> Self {
        Self::new(TiktokenRegistry::new())
    }
}

impl Default for TokenEstimator<TiktokenRegistry> {
    fn default() -> Self {
        Self::tiktoken()
    }
}

impl<R: EncodingRegistry> TokenEstimator<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Read the file once and count it under every encoding.
    ///
    /// Only the read can fail; per-encoding failures end up in the report.
    pub fn estimate(&self, path: impl AsRef<Path>) -> Result<TokenReport, TokenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TokenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.estimate_text(&content))
    }

    pub fn estimate_text(&self, text: &str) -> TokenReport {
        let outcomes = self
            .registry
            .names()
            .into_iter()
            .map(|scheme| {
                let result = match self
                    .registry
                    .load(&scheme)
                    .and_then(|counter| counter.count(text))
                {
                    Ok(tokens) => {
                        debug!(scheme = %scheme, tokens, "Counted tokens");
                        SchemeResult::Counted { tokens }
                    }
                    Err(e) => {
                        warn!(scheme = %scheme, error = %e, "Encoding failed");
                        SchemeResult::Failed {
                            reason: e.to_string(),
                        }
                    }
                };
                SchemeOutcome { scheme, result }
            })
            .collect();

        TokenReport { outcomes }
    }
}

/// Estimate a file under every tiktoken encoding
pub fn estimate(path: impl AsRef<Path>) -> Result<TokenReport, TokenError> {
    TokenEstimator::tiktoken().estimate(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TokenCounter;

    struct WhitespaceCounter(String);

    impl TokenCounter for WhitespaceCounter {
        fn name(&self) -> &str {
            &self.0
        }

        fn count(&self, text: &str) -> Result<usize, TokenError> {
            Ok(text.split_whitespace().count())
        }
    }

    struct BrokenCounter;

    impl TokenCounter for BrokenCounter {
        fn name(&self) -> &str {
            "broken"
        }

        fn count(&self, _text: &str) -> Result<usize, TokenError> {
            Err(TokenError::DisallowedSpecial {
                scheme: "broken".to_string(),
                token: "<|x|>".to_string(),
            })
        }
    }

    /// `words` counts, `broken` fails on encode, `missing` fails on load
    struct FakeRegistry;

    impl EncodingRegistry for FakeRegistry {
        fn names(&self) -> Vec<String> {
            vec!["words".into(), "broken".into(), "missing".into(), "words2".into()]
        }

        fn load(&self, name: &str) -> Result<Box<dyn TokenCounter>, TokenError> {
            match name {
                "words" | "words2" => Ok(Box::new(WhitespaceCounter(name.to_string()))),
                "broken" => Ok(Box::new(BrokenCounter)),
                other => Err(TokenError::Load {
                    scheme: other.to_string(),
                    reason: "vocabulary unavailable".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_failing_schemes_are_isolated() {
        let estimator = TokenEstimator::new(FakeRegistry);
        let report = estimator.estimate_text("one two three");

        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.counts(), vec![("words", 3), ("words2", 3)]);
        assert_eq!(report.get("words"), Some(3));
        assert_eq!(report.get("broken"), None);
        assert_eq!(report.get("missing"), None);

        let failures = report.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].0, "broken");
        assert_eq!(failures[1].0, "missing");
        assert!(failures[1].1.contains("vocabulary unavailable"));
    }

    #[test]
    fn test_estimate_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "alpha beta").unwrap();

        let report = TokenEstimator::new(FakeRegistry).estimate(&path).unwrap();
        assert_eq!(report.get("words"), Some(2));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenEstimator::new(FakeRegistry)
            .estimate(dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err, TokenError::Read { .. }));
    }

    #[test]
    fn test_report_serializes_status() {
        let report = TokenReport {
            outcomes: vec![
                SchemeOutcome {
                    scheme: "words".into(),
                    result: SchemeResult::Counted { tokens: 7 },
                },
                SchemeOutcome {
                    scheme: "broken".into(),
                    result: SchemeResult::Failed {
                        reason: "bad".into(),
                    },
                },
            ],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "counted");
        assert_eq!(json["outcomes"][0]["tokens"], 7);
        assert_eq!(json["outcomes"][1]["status"], "failed");
        assert_eq!(json["outcomes"][1]["reason"], "bad");
    }
}
