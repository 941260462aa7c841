use clap::{Args, Parser, Subcommand};
use corpus_config::Config;
use corpus_core::EntryOrder;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corpus")]
#[command(about = "Build a bounded text corpus and estimate its token counts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: per-user config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Concatenate source files into the corpus file
    Build(BuildArgs),

    /// Count tokens in a file under every known encoding
    Tokens {
        /// File to estimate
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the corpus, then estimate its tokens
    Run {
        #[command(flatten)]
        build: BuildArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            build: BuildArgs::default(),
            json: false,
        }
    }
}

/// Overrides for the build section of the config
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Directory containing the .txt source files
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Corpus file to write
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Target corpus size in MB
    #[arg(long)]
    pub target_mb: Option<u64>,

    /// Keep directory enumeration order instead of sorting by name
    #[arg(long)]
    pub unsorted: bool,
}

impl BuildArgs {
    pub fn apply(self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source_dir = source;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if let Some(target_mb) = self.target_mb {
            config.target_size_mb = target_mb;
        }
        if self.unsorted {
            config.order = EntryOrder::FileSystem;
        }
    }
}
