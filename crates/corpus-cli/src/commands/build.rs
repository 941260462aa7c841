use anyhow::{Context, Result};
use corpus_config::Config;
use corpus_core::{BuildSummary, CorpusBuilder};

use crate::cli::BuildArgs;
use crate::report;

pub fn handle(args: BuildArgs, config: &mut Config) -> Result<()> {
    args.apply(config);
    let summary = build(config)?;
    report::print_build(&summary);
    Ok(())
}

pub fn build(config: &Config) -> Result<BuildSummary> {
    CorpusBuilder::new(config.build_options())
        .build()
        .with_context(|| format!("Failed to build corpus from {}", config.source_dir.display()))
}
