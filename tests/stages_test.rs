use chrono::NaiveDate;
use news_pulse::{
    PipelineError, RunOutcome, Stage,
    analysis::{aggregate_daily, align_events, compute_returns, join_daily},
    config::AlignmentPolicy,
    data::{JsonChartWriter, read_news, read_prices},
    engine::{Pipeline, PipelineConfig, SilentObserver, SymbolJob},
    sentiment::score_events,
};
use news_pulse::config::PriceSchema;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

// Thu 4, Fri 5, Mon 8, Tue 9, Wed 10
const PRICES: &str = "\
Date,Close
2024-01-04,50.0
2024-01-05,51.0
2024-01-08,49.0
2024-01-09,49.5
2024-01-10,50.5
";

const WEEKEND_NEWS: &str = "\
date,headline,publisher
2024-01-06 08:00:00,first,Wire
2024-01-06 20:15:00,second,Wire
2024-01-07 11:00:00,third,Wire
";

#[test]
fn weekend_events_collapse_into_one_monday_record() {
    let news = read_news(WEEKEND_NEWS.as_bytes(), "news.csv").unwrap();
    let prices = read_prices(PRICES.as_bytes(), "prices.csv", "TEST", PriceSchema::CloseOnly).unwrap();

    let scored = score_events(news, &|_: &str| 0.5);
    let calendar = prices.calendar().unwrap();
    let aligned = align_events(scored, &calendar, AlignmentPolicy::Strict).unwrap();
    assert!(aligned.events.iter().all(|e| e.aligned_date == day(8)));

    let summaries = aggregate_daily(&aligned.events).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].trading_day, day(8));
    assert_eq!(summaries[0].news_count, 3);

    let returns = compute_returns(&prices);
    let joined = join_daily(&summaries, &returns.returns);
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].trading_day, day(8));
    assert!((joined[0].return_pct - (49.0 - 51.0) / 51.0 * 100.0).abs() < 1e-9);
}

// Runs one symbol from in-memory file contents with a constant scorer
fn run_files(news: &str, prices: &str) -> RunOutcome {
    let dir = tempfile::tempdir().unwrap();
    let news_path = dir.path().join("news.csv");
    let prices_path = dir.path().join("prices.csv");
    std::fs::write(&news_path, news).unwrap();
    std::fs::write(&prices_path, prices).unwrap();

    let scorer = |_: &str| 0.5;
    let pipeline = Pipeline::new(
        PipelineConfig {
            output_dir: dir.path().join("out"),
            ..PipelineConfig::default()
        },
        &scorer,
        &JsonChartWriter,
    );
    let job = SymbolJob {
        symbol: "TEST".to_string(),
        news_path,
        prices_path,
    };
    pipeline.run(&job, &SilentObserver)
}

#[test]
fn single_joined_day_is_too_few_to_correlate() {
    match run_files(WEEKEND_NEWS, PRICES) {
        RunOutcome::Failed(failure) => {
            assert_eq!(failure.stage, Stage::Correlate);
            assert!(failure.error.contains("at least 2"));
        }
        other => panic!("expected a correlate failure, got {:?}", other),
    }
}

#[test]
fn empty_news_file_fails_at_correlate_with_no_observations() {
    match run_files("date,headline,publisher\n", PRICES) {
        RunOutcome::Failed(failure) => {
            assert_eq!(failure.stage, Stage::Correlate);
            assert!(failure.error.contains("got 0"), "{}", failure.error);
        }
        other => panic!("expected a correlate failure, got {:?}", other),
    }
}

#[test]
fn price_file_without_close_fails_at_load() {
    let prices = "Date,Open\n2024-01-04,50.0\n2024-01-05,51.0\n";
    match run_files(WEEKEND_NEWS, prices) {
        RunOutcome::Failed(failure) => {
            assert_eq!(failure.stage, Stage::Load);
            assert!(failure.error.contains("missing required column(s): Close"), "{}", failure.error);
        }
        other => panic!("expected a load failure, got {:?}", other),
    }
}

#[test]
fn null_open_does_not_stop_a_close_only_run() {
    let prices = "\
Date,Open,Close
2024-01-04,null,50.0
2024-01-05,51.0,51.0
2024-01-08,,49.0
2024-01-09,49.0,49.5
2024-01-10,49.5,50.5
";
    let news = "\
date,headline,publisher
2024-01-05,a,Wire
2024-01-08,b,Wire
";
    let scorer = |text: &str| if text == "a" { 0.4 } else { -0.2 };
    let series = read_prices(prices.as_bytes(), "prices.csv", "TEST", PriceSchema::CloseOnly).unwrap();
    assert_eq!(series.open_prices[0], None);

    let pipeline = Pipeline::new(
        PipelineConfig {
            write_artifacts: false,
            ..PipelineConfig::default()
        },
        &scorer,
        &JsonChartWriter,
    );
    let news = read_news(news.as_bytes(), "news.csv").unwrap();
    let run = pipeline.analyze("TEST", news, &series, &SilentObserver).unwrap();
    assert_eq!(run.correlation.observations, 2);
}

#[test]
fn duplicate_price_days_are_a_load_error() {
    let csv = "Date,Close\n2024-01-04,1.0\n2024-01-04,2.0\n";
    let err = read_prices(csv.as_bytes(), "prices.csv", "TEST", PriceSchema::CloseOnly).unwrap_err();
    assert!(matches!(err, PipelineError::DuplicateTradingDay(d) if d == day(4)));
}
