use anyhow::{Context, Result};
use corpus_config::Config;
use corpus_tokens::TokenEstimator;
use std::path::Path;

use crate::report::Report;

pub fn handle(file: &Path, json: bool, config: &Config) -> Result<()> {
    let tokens = TokenEstimator::tiktoken()
        .estimate(file)
        .with_context(|| format!("Failed to estimate tokens for {}", file.display()))?;

    let report = Report::new(None, &tokens, &config.models);
    if json {
        report.print_json()
    } else {
        report.print();
        Ok(())
    }
}
