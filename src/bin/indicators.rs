use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};
use news_pulse::analysis::indicators::{compute_indicator_table, standard_indicators};
use news_pulse::config::{
    ANALYSIS, PERSISTENCE, PriceSchema, indicators_filename, indicators_plot_filename,
};
use news_pulse::data::{
    ChartRenderer, IndicatorChartBundle, JsonChartWriter, load_prices, write_indicator_table,
};
use news_pulse::utils::TimeUtils;

/// Computes SMA, RSI and MACD over a daily OHLCV file, writes them next to the closes
/// and emits the price, RSI and MACD chart panels.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Daily price CSV with Date, Open, High, Low, Close and Volume columns
    #[arg(long)]
    prices: PathBuf,

    #[arg(long)]
    symbol: String,

    #[arg(long, default_value = PERSISTENCE.output.directory)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let series = load_prices(&args.prices, &args.symbol, PriceSchema::Ohlcv)
        .with_context(|| format!("loading prices for {}", args.symbol))?;
    log::info!("Loaded {} bars for {}", series.len(), args.symbol);

    let indicators = standard_indicators(&ANALYSIS.indicators);
    let table = compute_indicator_table(&series, &indicators);

    let path = args.output_dir.join(indicators_filename(&args.symbol));
    write_indicator_table(&table, &path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Indicators saved to {}", path.display());

    let plot_path = args.output_dir.join(indicators_plot_filename(&args.symbol));
    let bundle = IndicatorChartBundle::build(&table, &ANALYSIS.indicators);
    JsonChartWriter
        .render_indicators(&bundle, &plot_path)
        .with_context(|| format!("writing {}", plot_path.display()))?;
    log::info!("Indicator charts saved to {}", plot_path.display());

    // Preview the most recent rows
    let mut builder = Builder::default();
    let mut header = vec!["Date".to_string(), "Close".to_string()];
    header.extend(table.columns.iter().map(|(name, _)| name.clone()));
    builder.push_record(header);

    let start = table.len().saturating_sub(ANALYSIS.indicators.preview_rows);
    for i in start..table.len() {
        let mut row = vec![
            TimeUtils::format_date(table.dates[i]),
            format!("{:.2}", table.closes[i]),
        ];
        row.extend(table.columns.iter().map(|(_, values)| {
            values[i]
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string())
        }));
        builder.push_record(row);
    }

    println!("{}", builder.build().with(Style::rounded()));
    Ok(())
}
