//! CSV loading for the news and price files.
//!
//! Column presence is checked against [`SCHEMA`] before any row is read, and every
//! missing column is reported at once.

use {
    crate::{
        config::{ClosePrice, PriceSchema, SCHEMA},
        domain::{NewsEvent, PriceBar},
        error::{PipelineError, PipelineResult},
        models::PriceSeries,
        utils::parse_timestamp,
    },
    csv::{ReaderBuilder, StringRecord, Trim},
    std::{collections::HashMap, fs::File, io::Read, path::Path},
};

/// Header name -> column index, restricted to the columns a caller asked for.
struct ColumnIndex<'a> {
    source_name: &'a str,
    positions: HashMap<&'static str, usize>,
}

impl<'a> ColumnIndex<'a> {
    fn resolve(
        headers: &StringRecord,
        required: &[&'static str],
        source_name: &'a str,
    ) -> PipelineResult<Self> {
        let mut positions = HashMap::new();
        let mut missing = Vec::new();

        for &name in required {
            match headers.iter().position(|h| h == name) {
                Some(idx) => {
                    positions.insert(name, idx);
                }
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(PipelineError::Schema {
                source_name: source_name.to_string(),
                missing,
            });
        }

        Ok(Self {
            source_name,
            positions,
        })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &'static str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&idx| record.get(idx))
            .unwrap_or("")
    }

    fn malformed(&self, line: usize, column: &str, value: &str) -> PipelineError {
        PipelineError::MalformedValue {
            source_name: self.source_name.to_string(),
            line,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    fn parse_f64(&self, record: &StringRecord, line: usize, column: &'static str) -> PipelineResult<f64> {
        let raw = self.get(record, column);
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.malformed(line, column, raw))
    }

    // Blank cells read as None, anything else must parse
    fn parse_optional_f64(
        &self,
        record: &StringRecord,
        line: usize,
        column: &'static str,
    ) -> PipelineResult<Option<f64>> {
        if self.get(record, column).trim().is_empty() {
            return Ok(None);
        }
        self.parse_f64(record, line, column).map(Some)
    }

    // Open/High/Low/Volume are only validated when the schema requires them.
    // Otherwise an unreadable cell (e.g. "null") reads as blank and is counted.
    fn parse_passthrough(
        &self,
        record: &StringRecord,
        line: usize,
        column: &'static str,
        schema: PriceSchema,
        unreadable: &mut usize,
    ) -> PipelineResult<Option<f64>> {
        match self.parse_optional_f64(record, line, column) {
            Err(_) if schema == PriceSchema::CloseOnly => {
                *unreadable += 1;
                Ok(None)
            }
            other => other,
        }
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new().trim(Trim::All).from_reader(reader)
}

fn open(path: &Path) -> PipelineResult<File> {
    File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_error(source_name: &str, source: csv::Error) -> PipelineError {
    PipelineError::Csv {
        path: source_name.into(),
        source,
    }
}

pub fn load_news(path: &Path) -> PipelineResult<Vec<NewsEvent>> {
    let file = open(path)?;
    read_news(file, &path.display().to_string())
}

/// Reads `date`, `headline` and `publisher`. Extra columns are ignored.
pub fn read_news<R: Read>(reader: R, source_name: &str) -> PipelineResult<Vec<NewsEvent>> {
    let cols = &SCHEMA.news;
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(source_name, e))?.clone();
    let index = ColumnIndex::resolve(&headers, &cols.required(), source_name)?;

    let mut events = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| csv_error(source_name, e))?;
        // header is line 1
        let line = row + 2;

        let raw_date = index.get(&record, cols.date);
        let timestamp =
            parse_timestamp(raw_date).ok_or_else(|| index.malformed(line, cols.date, raw_date))?;

        events.push(NewsEvent::new(
            timestamp,
            index.get(&record, cols.headline),
            index.get(&record, cols.publisher),
        ));
    }

    log::debug!("{}: loaded {} news events", source_name, events.len());
    Ok(events)
}

pub fn load_prices(path: &Path, symbol: &str, schema: PriceSchema) -> PipelineResult<PriceSeries> {
    let file = open(path)?;
    read_prices(file, &path.display().to_string(), symbol, schema)
}

/// Reads a daily price file into a date-sorted [`PriceSeries`].
/// Duplicate dates are rejected.
pub fn read_prices<R: Read>(
    reader: R,
    source_name: &str,
    symbol: &str,
    schema: PriceSchema,
) -> PipelineResult<PriceSeries> {
    let cols = &SCHEMA.prices;
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(source_name, e))?.clone();

    // Optional OHLV columns are still picked up when present in a close-only load
    let mut wanted = cols.required_for(PriceSchema::Ohlcv);
    wanted.retain(|name| headers.iter().any(|h| h == *name));
    for name in cols.required_for(schema) {
        if !wanted.contains(&name) {
            wanted.push(name);
        }
    }
    let index = ColumnIndex::resolve(&headers, &wanted, source_name)?;

    let mut bars = Vec::new();
    let mut unreadable = 0;
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| csv_error(source_name, e))?;
        let line = row + 2;

        let raw_date = index.get(&record, cols.date);
        let date = parse_timestamp(raw_date)
            .ok_or_else(|| index.malformed(line, cols.date, raw_date))?
            .date();

        let volume = match index.parse_passthrough(&record, line, cols.volume, schema, &mut unreadable)? {
            Some(v) if v < 0.0 => {
                if schema == PriceSchema::Ohlcv {
                    return Err(index.malformed(line, cols.volume, index.get(&record, cols.volume)));
                }
                unreadable += 1;
                None
            }
            other => other.map(|v| v.round() as u64),
        };

        bars.push(PriceBar {
            date,
            open: index.parse_passthrough(&record, line, cols.open, schema, &mut unreadable)?,
            high: index.parse_passthrough(&record, line, cols.high, schema, &mut unreadable)?,
            low: index.parse_passthrough(&record, line, cols.low, schema, &mut unreadable)?,
            close: ClosePrice::new(index.parse_f64(&record, line, cols.close)?),
            volume,
        });
    }

    if unreadable > 0 {
        log::warn!(
            "{}: {} unreadable open/high/low/volume cell(s) left blank",
            source_name,
            unreadable
        );
    }

    let series = PriceSeries::from_bars(symbol, bars)?;
    log::debug!("{}: loaded {} price bars", source_name, series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, m, d).unwrap()
    }

    #[test]
    fn news_with_extra_columns_and_offsets() {
        let csv = "\
,headline,url,publisher,date,stock
0,Stocks That Hit 52-Week Highs,https://x,Benzinga Insights,2020-06-05 10:30:54-04:00,A
1,\"Agilent, Inc. beats\",https://y,Vick Meyer,2020-06-06,A
";
        let events = read_news(csv.as_bytes(), "news.csv").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date(), day(6, 5));
        assert_eq!(events[0].publisher, "Benzinga Insights");
        assert_eq!(events[1].headline, "Agilent, Inc. beats");
        assert!(events[1].sentiment.is_none());
    }

    #[test]
    fn news_missing_columns_are_all_named() {
        let csv = "date,title\n2020-01-01,hello\n";
        match read_news(csv.as_bytes(), "news.csv") {
            Err(PipelineError::Schema { missing, .. }) => {
                assert_eq!(missing, vec!["headline".to_string(), "publisher".to_string()]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn news_bad_date_names_line_and_column() {
        let csv = "date,headline,publisher\n2020-01-01,a,p\nnot-a-date,b,p\n";
        match read_news(csv.as_bytes(), "news.csv") {
            Err(PipelineError::MalformedValue { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "date");
            }
            other => panic!("expected malformed value, got {:?}", other),
        }
    }

    #[test]
    fn close_only_prices_are_sorted() {
        let csv = "Date,Close\n2020-01-03,11.0\n2020-01-02,10.0\n";
        let series = read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::CloseOnly).unwrap();
        assert_eq!(series.dates, vec![day(1, 2), day(1, 3)]);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(series.open_prices, vec![None, None]);
    }

    #[test]
    fn full_ohlcv_is_read_when_present() {
        let csv = "Date,Open,High,Low,Close,Adj Close,Volume\n\
                   2020-01-02,1.0,2.0,0.5,1.5,1.4,1000\n";
        let series = read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::CloseOnly).unwrap();
        assert_eq!(series.open_prices, vec![Some(1.0)]);
        assert_eq!(series.high_prices, vec![Some(2.0)]);
        assert_eq!(series.low_prices, vec![Some(0.5)]);
        assert_eq!(series.volumes, vec![Some(1000)]);
    }

    #[test]
    fn ohlcv_schema_requires_all_columns() {
        let csv = "Date,Close\n2020-01-02,10.0\n";
        match read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::Ohlcv) {
            Err(PipelineError::Schema { missing, .. }) => {
                assert_eq!(missing, vec!["Open", "High", "Low", "Volume"]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn unreadable_optional_cells_are_blank_for_close_only() {
        let csv = "Date,Open,Volume,Close\n2024-01-04,null,-5,50.0\n2024-01-05,51.0,700,51.0\n";
        let series = read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::CloseOnly).unwrap();
        assert_eq!(series.open_prices, vec![None, Some(51.0)]);
        assert_eq!(series.volumes, vec![None, Some(700)]);
        assert_eq!(series.closes(), vec![50.0, 51.0]);
    }

    #[test]
    fn unreadable_optional_cells_fail_ohlcv_load() {
        let csv = "Date,Open,High,Low,Close,Volume\n2024-01-04,null,1.0,1.0,1.0,10\n";
        match read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::Ohlcv) {
            Err(PipelineError::MalformedValue { line, column, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "Open");
                assert_eq!(value, "null");
            }
            other => panic!("expected malformed value, got {:?}", other),
        }
    }

    #[test]
    fn missing_close_value_is_malformed() {
        let csv = "Date,Close\n2020-01-02,\n";
        let res = read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::CloseOnly);
        assert!(matches!(res, Err(PipelineError::MalformedValue { line: 2, .. })));
    }

    #[test]
    fn duplicate_price_dates_are_rejected() {
        let csv = "Date,Close\n2020-01-02,10.0\n2020-01-02,10.5\n";
        let res = read_prices(csv.as_bytes(), "p.csv", "X", PriceSchema::CloseOnly);
        assert!(matches!(res, Err(PipelineError::DuplicateTradingDay(_))));
    }
}
