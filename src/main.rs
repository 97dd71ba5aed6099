use {
    anyhow::{Context, Result, bail},
    clap::Parser,
    news_pulse::{
        Cli, Pipeline, RunOutcome, data::JsonChartWriter, run_batch, sentiment::LexiconScorer,
    },
    std::panic,
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Correlation")]
    correlation: String,
    #[tabled(rename = "P-Value")]
    p_value: String,
    #[tabled(rename = "Days")]
    observations: String,
    #[tabled(rename = "Warnings")]
    warnings: usize,
}

impl From<&RunOutcome> for SummaryRow {
    fn from(outcome: &RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed(report) => Self {
                symbol: report.symbol.clone(),
                status: "ok".to_string(),
                correlation: format!("{:.3}", report.correlation),
                p_value: format!("{:.3}", report.p_value),
                observations: report.num_observations.to_string(),
                warnings: report.warnings.len(),
            },
            RunOutcome::Failed(failure) => Self {
                symbol: failure.symbol.clone(),
                status: format!("failed at {}", failure.stage),
                correlation: "-".to_string(),
                p_value: "-".to_string(),
                observations: "-".to_string(),
                warnings: 0,
            },
        }
    }
}

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("news_pulse"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    let jobs = args.jobs()?;

    let scorer = LexiconScorer::default();
    let renderer = JsonChartWriter;
    let pipeline = Pipeline::new(args.pipeline_config(), &scorer, &renderer);

    log::info!(
        "Analyzing {} symbol(s) against {}",
        jobs.len(),
        args.news.display()
    );
    let outcomes = run_batch(&pipeline, &jobs);

    let rows: Vec<SummaryRow> = outcomes.iter().map(SummaryRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    let json = serde_json::to_string_pretty(&outcomes).context("serializing run outcomes")?;
    println!("{}", json);

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.is_completed())
        .map(RunOutcome::symbol)
        .collect();
    if !failed.is_empty() {
        bail!("{} of {} run(s) failed: {}", failed.len(), outcomes.len(), failed.join(", "));
    }
    Ok(())
}
