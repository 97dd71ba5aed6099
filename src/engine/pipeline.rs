//! One symbol's run, stage by stage.
//!
//! Every stage is a pure function from the previous stage's output to its own. The
//! [`Pipeline`] only sequences them, tags failures with their [`Stage`], collects
//! warnings and reports progress to the run's [`RunObserver`].

use {
    super::observer::RunObserver,
    crate::{
        analysis::{
            Correlation, aggregate_daily, align_events, compute_returns, correlate_joined,
            flag_large_moves, join_daily,
        },
        config::{
            ANALYSIS, AlignmentPolicy, PERSISTENCE, PriceSchema, merged_data_filename,
            visualization_filename,
        },
        data::{ChartBundle, ChartRenderer, load_news, load_prices, write_joined},
        domain::{NewsEvent, TradingDayCalendar},
        error::{Stage, StageContext, StageError},
        models::{AnalysisReport, DailySentimentSummary, JoinedRecord, PriceSeries, RunOutcome},
        sentiment::{SentimentScorer, score_events},
    },
    std::path::PathBuf,
};

/// Runtime settings for a run. Defaults come from [`ANALYSIS`] and [`PERSISTENCE`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub alignment_policy: AlignmentPolicy,
    pub large_move_warning_pct: f64,
    pub histogram_bins: usize,
    /// Write the merged CSV and chart bundle. Off for in-memory use.
    pub write_artifacts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(PERSISTENCE.output.directory),
            alignment_policy: ANALYSIS.alignment.policy,
            large_move_warning_pct: ANALYSIS.returns.large_move_warning_pct,
            histogram_bins: ANALYSIS.charts.histogram_bins,
            write_artifacts: true,
        }
    }
}

/// Input files for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolJob {
    pub symbol: String,
    pub news_path: PathBuf,
    pub prices_path: PathBuf,
}

/// Everything the in-memory stages produce for one symbol.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub symbol: String,
    pub summaries: Vec<DailySentimentSummary>,
    pub joined: Vec<JoinedRecord>,
    pub correlation: Correlation,
    /// Score of every aligned news event, for the sentiment distribution
    pub event_sentiments: Vec<f64>,
    pub warnings: Vec<String>,
}

impl AnalysisRun {
    fn into_report(
        self,
        merged_data_path: Option<PathBuf>,
        visualization_path: Option<PathBuf>,
    ) -> AnalysisReport {
        AnalysisReport {
            symbol: self.symbol,
            correlation: self.correlation.coefficient,
            p_value: self.correlation.p_value,
            num_observations: self.correlation.observations,
            merged_data_path,
            visualization_path,
            warnings: self.warnings,
        }
    }
}

/// Warning list that also reports each entry to the observer.
struct Warnings<'o> {
    observer: &'o dyn RunObserver,
    messages: Vec<String>,
}

impl Warnings<'_> {
    fn push(&mut self, stage: Stage, message: String) {
        self.observer.warning(stage, &message);
        self.messages.push(message);
    }
}

pub struct Pipeline<'a> {
    pub config: PipelineConfig,
    scorer: &'a dyn SentimentScorer,
    renderer: &'a dyn ChartRenderer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: PipelineConfig,
        scorer: &'a dyn SentimentScorer,
        renderer: &'a dyn ChartRenderer,
    ) -> Self {
        Self {
            config,
            scorer,
            renderer,
        }
    }

    /// Loads the job's files, runs every stage and writes the artifacts.
    /// Never panics on bad input: failures come back as [`RunOutcome::Failed`].
    pub fn run(&self, job: &SymbolJob, observer: &dyn RunObserver) -> RunOutcome {
        match self.try_run(job, observer) {
            Ok(report) => RunOutcome::Completed(report),
            Err(err) => {
                observer.failed(&err);
                RunOutcome::failed(&job.symbol, &err)
            }
        }
    }

    fn try_run(&self, job: &SymbolJob, observer: &dyn RunObserver) -> Result<AnalysisReport, StageError> {
        observer.stage_started(Stage::Load);
        let news = load_news(&job.news_path).at(Stage::Load)?;
        let prices =
            load_prices(&job.prices_path, &job.symbol, PriceSchema::CloseOnly).at(Stage::Load)?;
        let calendar = prices.calendar().at(Stage::Load)?;
        observer.stage_finished(
            Stage::Load,
            &format!(
                "{} news rows, {} price bars from {} to {}",
                news.len(),
                prices.len(),
                calendar.first(),
                calendar.last()
            ),
        );

        let run = self.analyze_on(&job.symbol, news, &prices, &calendar, observer)?;

        if !self.config.write_artifacts {
            return Ok(run.into_report(None, None));
        }

        observer.stage_started(Stage::Persist);
        let merged_path = self.config.output_dir.join(merged_data_filename(&job.symbol));
        write_joined(&run.joined, &merged_path).at(Stage::Persist)?;
        observer.stage_finished(
            Stage::Persist,
            &format!("merged data saved to {}", merged_path.display()),
        );

        observer.stage_started(Stage::Render);
        let viz_path = self.config.output_dir.join(visualization_filename(&job.symbol));
        let bundle = ChartBundle::build(
            &job.symbol,
            &run.joined,
            &run.event_sentiments,
            self.config.histogram_bins,
        );
        self.renderer.render(&bundle, &viz_path).at(Stage::Render)?;
        observer.stage_finished(
            Stage::Render,
            &format!("visualization saved to {}", viz_path.display()),
        );

        Ok(run.into_report(Some(merged_path), Some(viz_path)))
    }

    /// The in-memory stages: score, align, aggregate, returns, join, correlate.
    /// A price series without bars fails as a `load` error.
    pub fn analyze(
        &self,
        symbol: &str,
        news: Vec<NewsEvent>,
        prices: &PriceSeries,
        observer: &dyn RunObserver,
    ) -> Result<AnalysisRun, StageError> {
        let calendar = prices.calendar().at(Stage::Load)?;
        self.analyze_on(symbol, news, prices, &calendar, observer)
    }

    fn analyze_on(
        &self,
        symbol: &str,
        news: Vec<NewsEvent>,
        prices: &PriceSeries,
        calendar: &TradingDayCalendar,
        observer: &dyn RunObserver,
    ) -> Result<AnalysisRun, StageError> {
        let mut warnings = Warnings {
            observer,
            messages: Vec::new(),
        };

        // 1. Score
        observer.stage_started(Stage::Score);
        let scored = crate::trace_time!("score headlines", 50_000, {
            score_events(news, self.scorer)
        });
        observer.stage_finished(Stage::Score, &format!("{} headlines scored", scored.len()));

        // 2. Align
        observer.stage_started(Stage::Align);
        let alignment = crate::trace_time!("align dates", 10_000, {
            align_events(scored, calendar, self.config.alignment_policy)
        })
        .at(Stage::Align)?;
        for (event, err) in &alignment.dropped {
            warnings.push(
                Stage::Align,
                format!("dropped news {:?}: {}", event.headline, err),
            );
        }
        let shifted = alignment.events.iter().filter(|e| e.was_shifted()).count();
        observer.stage_finished(
            Stage::Align,
            &format!(
                "{} events on a {}-day calendar ({} moved to a later trading day)",
                alignment.events.len(),
                calendar.len(),
                shifted
            ),
        );

        // 3. Aggregate
        observer.stage_started(Stage::Aggregate);
        let summaries = aggregate_daily(&alignment.events).at(Stage::Aggregate)?;
        observer.stage_finished(
            Stage::Aggregate,
            &format!("{} days with news", summaries.len()),
        );

        // 4. Returns
        observer.stage_started(Stage::Returns);
        let returns = compute_returns(prices);
        for flagged in &returns.flagged {
            warnings.push(Stage::Returns, flagged.to_string());
        }
        for message in flag_large_moves(&returns.returns, self.config.large_move_warning_pct) {
            warnings.push(Stage::Returns, message);
        }
        observer.stage_finished(
            Stage::Returns,
            &format!(
                "{} defined returns over {} bars",
                returns.defined_count(),
                prices.len()
            ),
        );

        // 5. Join
        observer.stage_started(Stage::Join);
        let joined = join_daily(&summaries, &returns.returns);
        observer.stage_finished(Stage::Join, &format!("{} joined days", joined.len()));

        // 6. Correlate
        observer.stage_started(Stage::Correlate);
        let correlation = correlate_joined(&joined).at(Stage::Correlate)?;
        observer.stage_finished(
            Stage::Correlate,
            &format!(
                "correlation between sentiment and returns: {:.3} (p-value: {:.3}, n = {})",
                correlation.coefficient, correlation.p_value, correlation.observations
            ),
        );

        let event_sentiments = alignment
            .events
            .iter()
            .filter_map(|a| a.event.sentiment)
            .map(|s| s.value())
            .collect();

        Ok(AnalysisRun {
            symbol: symbol.to_string(),
            summaries,
            joined,
            correlation,
            event_sentiments,
            warnings: warnings.messages,
        })
    }
}
