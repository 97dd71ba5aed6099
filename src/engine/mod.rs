// Symbol runs: stage sequencing, observers and multi-symbol batches
mod batch;
mod observer;
mod pipeline;

pub use batch::{run_batch, run_batch_with};
pub use observer::{LogObserver, RunObserver, SilentObserver};
pub use pipeline::{AnalysisRun, Pipeline, PipelineConfig, SymbolJob};
