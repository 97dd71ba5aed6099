use {
    crate::{
        analysis::indicators::IndicatorTable,
        error::{PipelineError, PipelineResult},
        models::JoinedRecord,
        utils::TimeUtils,
    },
    csv::Writer,
    std::{
        fs::{self, File},
        path::Path,
    },
};

// Helper function to create a new file and any missing parent directories.
pub(crate) fn create_file_with_parents(path: &Path) -> PipelineResult<File> {
    let io_err = |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    File::create(path).map_err(io_err)
}

fn csv_err(path: &Path) -> impl Fn(csv::Error) -> PipelineError + '_ {
    move |source| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes the merged dataset, one row per joined day, in the order given.
pub fn write_joined(records: &[JoinedRecord], path: &Path) -> PipelineResult<()> {
    let file = create_file_with_parents(path)?;
    let mut writer = Writer::from_writer(file);

    if records.is_empty() {
        // serde only emits headers alongside the first record
        writer
            .write_record(["trading_day", "avg_sentiment", "news_count", "return_pct", "close"])
            .map_err(csv_err(path))?;
    }
    for record in records {
        writer.serialize(record).map_err(csv_err(path))?;
    }

    writer.flush().map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `Date, Close` followed by one column per indicator. Warm-up cells stay blank.
pub fn write_indicator_table(table: &IndicatorTable, path: &Path) -> PipelineResult<()> {
    let file = create_file_with_parents(path)?;
    let mut writer = Writer::from_writer(file);

    let mut header = vec!["Date".to_string(), "Close".to_string()];
    header.extend(table.columns.iter().map(|(name, _)| name.clone()));
    writer.write_record(&header).map_err(csv_err(path))?;

    for (i, date) in table.dates.iter().enumerate() {
        let mut row = vec![TimeUtils::format_date(*date), table.closes[i].to_string()];
        row.extend(
            table
                .columns
                .iter()
                .map(|(_, values)| values[i].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row).map_err(csv_err(path))?;
    }

    writer.flush().map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
