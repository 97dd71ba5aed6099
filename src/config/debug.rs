//! Debugging feature flags.

pub struct LogFlags {
    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Log every news event whose date moved onto a later trading day.
    pub log_alignment: bool,

    /// Log each per-day sentiment summary as it is produced.
    pub log_daily_summaries: bool,
}

pub const DEBUG_FLAGS: LogFlags = LogFlags {
    log_performance: false,
    log_alignment: false,
    log_daily_summaries: false,
};
