#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod sentiment;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries and tests)
pub use config::{ANALYSIS, PERSISTENCE};
pub use engine::{Pipeline, PipelineConfig, SymbolJob, run_batch};
pub use error::{PipelineError, Stage, StageError};
pub use models::{AnalysisReport, FailureReport, RunOutcome};

// CLI argument parsing
use {anyhow::bail, clap::Parser, itertools::Itertools, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// News CSV with date, headline and publisher columns
    #[arg(long)]
    pub news: PathBuf,

    /// Ticker symbol. Repeat for several symbols, each paired with a --prices file
    #[arg(long = "symbol", required = true)]
    pub symbols: Vec<String>,

    /// Daily price CSV with Date and Close columns, one per --symbol, in the same order
    #[arg(long = "prices", required = true)]
    pub prices: Vec<PathBuf>,

    /// Directory for the merged CSV and chart bundle of every symbol
    #[arg(long, default_value = PERSISTENCE.output.directory)]
    pub output_dir: PathBuf,

    /// Drop news dated after the last trading day instead of failing the run
    #[arg(long, default_value_t = false)]
    pub drop_late_news: bool,
}

impl Cli {
    /// Pairs every `--symbol` with its `--prices` file. All symbols share the news file.
    /// Output files are named by symbol, so each symbol may appear only once.
    pub fn jobs(&self) -> anyhow::Result<Vec<SymbolJob>> {
        if self.symbols.len() != self.prices.len() {
            bail!(
                "got {} --symbol value(s) but {} --prices file(s); pass one price file per symbol",
                self.symbols.len(),
                self.prices.len()
            );
        }

        let repeated: Vec<&String> = self.symbols.iter().duplicates().collect();
        if !repeated.is_empty() {
            bail!("symbol(s) given more than once: {}", repeated.iter().join(", "));
        }

        Ok(self
            .symbols
            .iter()
            .zip(&self.prices)
            .map(|(symbol, prices)| SymbolJob {
                symbol: symbol.clone(),
                news_path: self.news.clone(),
                prices_path: prices.clone(),
            })
            .collect())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let alignment_policy = if self.drop_late_news {
            config::AlignmentPolicy::DropLate
        } else {
            ANALYSIS.alignment.policy
        };
        PipelineConfig {
            output_dir: self.output_dir.clone(),
            alignment_policy,
            ..PipelineConfig::default()
        }
    }
}
