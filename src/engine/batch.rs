use {
    super::{
        observer::{LogObserver, RunObserver},
        pipeline::{Pipeline, SymbolJob},
    },
    crate::models::RunOutcome,
    rayon::prelude::*,
};

/// Runs every job in parallel, each with its own [`LogObserver`].
/// Outcomes come back in job order and one failed symbol never affects another.
/// Artifacts are named by symbol, so jobs are expected to carry distinct symbols.
pub fn run_batch(pipeline: &Pipeline<'_>, jobs: &[SymbolJob]) -> Vec<RunOutcome> {
    run_batch_with(pipeline, jobs, |job| Box::new(LogObserver::new(&job.symbol)))
}

pub fn run_batch_with<F>(pipeline: &Pipeline<'_>, jobs: &[SymbolJob], make_observer: F) -> Vec<RunOutcome>
where
    F: Fn(&SymbolJob) -> Box<dyn RunObserver> + Sync,
{
    crate::trace_time!("run batch", 5_000_000, {
        jobs.par_iter()
            .map(|job| {
                let observer = make_observer(job);
                pipeline.run(job, observer.as_ref())
            })
            .collect()
    })
}
