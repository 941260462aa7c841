mod cli;
mod commands;
mod report;

use anyhow::Result;
use clap::Parser;
use corpus_config::Config;

fn main() -> Result<()> {
    // Initialize tracing on stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(
        source = %config.source_dir.display(),
        target_mb = config.target_size_mb,
        "Configuration loaded"
    );

    match cli.command.unwrap_or_default() {
        cli::Commands::Build(args) => commands::build::handle(args, &mut config),
        cli::Commands::Tokens { file, json } => commands::tokens::handle(&file, json, &config),
        cli::Commands::Run { build, json } => commands::run::handle(build, json, &mut config),
    }
}
