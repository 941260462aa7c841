use anyhow::{Context, Result};
use corpus_config::Config;
use corpus_tokens::TokenEstimator;

use crate::cli::BuildArgs;
use crate::commands::build::build;
use crate::report::Report;

/// Build the corpus, estimate it, and report both
pub fn handle(args: BuildArgs, json: bool, config: &mut Config) -> Result<()> {
    args.apply(config);
    let summary = build(config)?;

    let tokens = TokenEstimator::tiktoken()
        .estimate(&summary.output_path)
        .with_context(|| {
            format!(
                "Failed to estimate tokens for {}",
                summary.output_path.display()
            )
        })?;

    let report = Report::new(Some(&summary), &tokens, &config.models);
    if json {
        report.print_json()
    } else {
        report.print();
        Ok(())
    }
}
