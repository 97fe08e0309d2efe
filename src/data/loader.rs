use std::path::Path;

use super::model::{Dataset, ErrorLog, ReadError, ReadReport};
use super::sniff::{sample_window, HeaderDetector, Sniffer};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Maximum number of data columns accepted by default.
pub const DEFAULT_MAX_COLUMNS: usize = 26;

/// Leading bytes inspected by the header detector by default.
pub const DEFAULT_SNIFF_WINDOW: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    pub delimiter: u8,
    pub max_columns: usize,
    pub sniff_window: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_columns: DEFAULT_MAX_COLUMNS,
            sniff_window: DEFAULT_SNIFF_WINDOW,
        }
    }
}

impl ReaderConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_sniff_window(mut self, sniff_window: usize) -> Self {
        self.sniff_window = sniff_window;
        self
    }
}

/// Parse a delimiter given on the command line or typed into the UI.
///
/// Accepts a single ASCII character, or `\t` / `tab` for a tab.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() && *b != b'\n' && *b != b'\r' && *b != b'"' => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
        },
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Reads delimited numeric tables, collecting recoverable problems in an
/// [`ErrorLog`] instead of failing.
#[derive(Debug, Clone)]
pub struct CsvDataReader<D = Sniffer> {
    config: ReaderConfig,
    detector: D,
}

impl Default for CsvDataReader<Sniffer> {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

impl CsvDataReader<Sniffer> {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            detector: Sniffer,
        }
    }
}

impl<D: HeaderDetector> CsvDataReader<D> {
    /// Reader with a custom header detector.
    pub fn with_detector(config: ReaderConfig, detector: D) -> Self {
        Self { config, detector }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a table from a file.
    pub fn read(&self, path: impl AsRef<Path>) -> ReadReport {
        let path = path.as_ref();
        let source = path.display().to_string();
        match std::fs::read(path) {
            Ok(bytes) => self.read_bytes(source, &bytes),
            Err(e) => {
                let error = ReadError::Io {
                    source_name: source.clone(),
                    message: e.to_string(),
                };
                log::error!("{error}");
                let mut log = ErrorLog::new();
                log.push(0, error.clone());
                ReadReport {
                    source,
                    result: Err(error),
                    log,
                }
            }
        }
    }

    /// Read a table from in-memory content. `source` labels the report.
    pub fn read_bytes(&self, source: impl Into<String>, bytes: &[u8]) -> ReadReport {
        let source = source.into();
        let mut log = ErrorLog::new();
        let result = self.parse(bytes, &mut log);

        match &result {
            Ok(ds) => log::info!(
                "Read {} rows x {} columns from '{source}' ({} error(s))",
                ds.row_count(),
                ds.column_count(),
                log.count()
            ),
            Err(e) => {
                log::error!("Failed to read '{source}': {e}");
                log.push(0, e.clone());
            }
        }

        ReadReport {
            source,
            result,
            log,
        }
    }

    fn parse(&self, bytes: &[u8], log: &mut ErrorLog) -> Result<Dataset, ReadError> {
        if bytes.is_empty() {
            return Err(ReadError::EmptyFile);
        }

        // ---- Shape ----
        let (record_count, column_count) = self.shape(bytes);

        let sample = sample_window(bytes, self.config.sniff_window);
        let has_header = match self.detector.has_header(sample, self.config.delimiter) {
            Ok(h) => h,
            Err(e) => {
                log::warn!("header detection failed: {e}");
                log.push(0, ReadError::HeaderDetection(e.to_string()));
                false
            }
        };
        let row_count = record_count.saturating_sub(usize::from(has_header));
        log::debug!(
            "shape: {record_count} record(s), {column_count} column(s), header: {has_header}"
        );

        if row_count < 1 || column_count < 1 {
            return Err(ReadError::NoData);
        }
        if column_count > self.config.max_columns {
            return Err(ReadError::TooManyColumns {
                found: column_count,
                max: self.config.max_columns,
            });
        }

        // ---- Conversion ----
        let mut dataset = Dataset::zeroed(row_count, column_count);
        let mut records = self.csv_reader(bytes).into_byte_records();

        if has_header {
            if let Some(Ok(first)) = records.next() {
                let headers = first
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).trim().to_string())
                    .collect();
                dataset.set_headers(headers);
            }
        }

        for (index, record) in records.take(row_count).enumerate() {
            let row = index + 1;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    // Only I/O errors can surface here and the source is a slice.
                    log::warn!("row {row}: {e}");
                    dataset.clear_row(index);
                    continue;
                }
            };

            if record.len() != column_count {
                let error = if record.len() < column_count {
                    ReadError::RowWidthTooSmall {
                        expected: column_count,
                        found: record.len(),
                    }
                } else {
                    ReadError::RowWidthTooBig {
                        expected: column_count,
                        found: record.len(),
                    }
                };
                log::warn!("row {row}: {error}");
                log.push(row, error);
                dataset.clear_row(index);
                continue;
            }

            for (column, field) in record.iter().enumerate() {
                match parse_field(field) {
                    Some(value) => dataset.set(index, column, Some(value)),
                    None => {
                        let error = ReadError::InvalidValue {
                            column: column + 1,
                            text: String::from_utf8_lossy(field).into_owned(),
                        };
                        log::warn!("row {row}: {error}");
                        log.push(row, error);
                        dataset.set(index, column, None);
                    }
                }
            }
        }

        Ok(dataset)
    }

    /// Count records and take the column count from the first one.
    fn shape(&self, bytes: &[u8]) -> (usize, usize) {
        let mut reader = self.csv_reader(bytes);
        let mut record_count = 0;
        let mut column_count = 0;
        let mut record = csv::ByteRecord::new();
        while let Ok(true) = reader.read_byte_record(&mut record) {
            if record_count == 0 {
                column_count = record.len();
            }
            record_count += 1;
        }
        (record_count, column_count)
    }

    fn csv_reader<'a>(&self, bytes: &'a [u8]) -> csv::Reader<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
    }
}

/// Convert one field to a finite float. Surrounding whitespace is ignored.
fn parse_field(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field)
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sniff::FixedHeader;

    fn read(text: &str) -> ReadReport {
        CsvDataReader::new(ReaderConfig::default()).read_bytes("test", text.as_bytes())
    }

    #[test]
    fn empty_input_is_fatal() {
        let report = read("");
        assert_eq!(report.result, Err(ReadError::EmptyFile));
        assert_eq!(report.log.count(), 1);
        assert_eq!(report.log.entries()[0].row, 0);
    }

    #[test]
    fn well_formed_without_header() {
        let report = read("0,1.5\n1,2.5\n2,3.5\n");
        let ds = report.dataset().unwrap();
        assert_eq!((ds.row_count(), ds.column_count()), (3, 2));
        assert!(ds.headers().is_none());
        assert_eq!(ds.row(2), &[Some(2.0), Some(3.5)]);
        assert!(report.log.is_empty());
    }

    #[test]
    fn header_is_captured_and_not_counted() {
        let report = read("time,dose\n0,1.5\n1,2.5\n");
        let ds = report.dataset().unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.headers().unwrap(), &["time".to_string(), "dose".to_string()]);
        assert_eq!(ds.row(0), &[Some(0.0), Some(1.5)]);
    }

    #[test]
    fn only_a_header_means_no_data() {
        let reader = CsvDataReader::with_detector(ReaderConfig::default(), FixedHeader(true));
        let report = reader.read_bytes("test", b"time,dose\n");
        assert_eq!(report.result, Err(ReadError::NoData));
    }

    #[test]
    fn blank_content_means_no_data() {
        assert_eq!(read("\n\n").result, Err(ReadError::NoData));
    }

    #[test]
    fn column_limit() {
        let config = ReaderConfig::default().with_max_columns(2);
        let report = CsvDataReader::new(config).read_bytes("test", b"1,2,3\n4,5,6\n");
        assert_eq!(
            report.result,
            Err(ReadError::TooManyColumns { found: 3, max: 2 })
        );
        assert_eq!(report.log.last(), Some(&ReadError::TooManyColumns { found: 3, max: 2 }));
    }

    #[test]
    fn wide_row_is_cleared() {
        let report = read("1,2\n3,4,5\n6,7\n");
        let ds = report.dataset().unwrap();
        assert_eq!(ds.row(1), &[None, None]);
        assert_eq!(ds.row(2), &[Some(6.0), Some(7.0)]);
        assert_eq!(report.log.entries()[0].row, 2);
        assert_eq!(
            report.log.entries()[0].error,
            ReadError::RowWidthTooBig { expected: 2, found: 3 }
        );
    }

    #[test]
    fn fields_are_trimmed_and_must_be_finite() {
        let report = read("1, 2 ,inf\n4,nan,6\n");
        let ds = report.dataset().unwrap();
        assert_eq!(ds.row(0), &[Some(1.0), Some(2.0), None]);
        assert_eq!(ds.row(1), &[Some(4.0), None, Some(6.0)]);
        assert_eq!(report.log.count(), 2);
    }

    #[test]
    fn custom_delimiter() {
        let config = ReaderConfig::default().with_delimiter(b';');
        let report = CsvDataReader::new(config).read_bytes("test", b"x;y\n1,5;2\n");
        let ds = report.dataset().unwrap();
        assert_eq!(ds.row_count(), 1);
        // "1,5" is not a float with '.' as the decimal separator.
        assert_eq!(ds.row(0), &[None, Some(2.0)]);
    }

    #[test]
    fn forced_header_absent_keeps_first_record() {
        let reader = CsvDataReader::with_detector(ReaderConfig::default(), FixedHeader(false));
        let report = reader.read_bytes("test", b"time,dose\n0,1\n");
        let ds = report.dataset().unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.row(0), &[None, None]);
        assert_eq!(report.log.for_row(1).count(), 2);
    }

    #[test]
    fn header_detection_failure_is_logged_and_read_continues() {
        let config = ReaderConfig::default().with_sniff_window(0);
        let report = CsvDataReader::new(config).read_bytes("test", b"1,2\n3,4\n");
        let entry = &report.log.entries()[0];
        assert_eq!(entry.row, 0);
        assert!(matches!(entry.error, ReadError::HeaderDetection(_)));

        let ds = report.dataset().unwrap();
        assert_eq!((ds.row_count(), ds.column_count()), (2, 2));
        assert!(ds.headers().is_none());
        assert_eq!(ds.row(1), &[Some(3.0), Some(4.0)]);
    }

    #[test]
    fn non_utf8_field_is_a_conversion_error() {
        let report = CsvDataReader::new(ReaderConfig::default())
            .read_bytes("test", b"1,2\n3,\xff\n5,6\n");
        let ds = report.dataset().unwrap();
        assert_eq!(ds.row(0), &[Some(1.0), Some(2.0)]);
        assert_eq!(ds.row(1), &[Some(3.0), None]);
        assert_eq!(ds.row(2), &[Some(5.0), Some(6.0)]);
        assert_eq!(report.log.count(), 1);
        assert_eq!(report.log.entries()[0].row, 2);
        assert!(matches!(
            report.log.entries()[0].error,
            ReadError::InvalidValue { column: 2, .. }
        ));
    }

    #[test]
    fn config_setters() {
        let reader = CsvDataReader::new(
            ReaderConfig::default()
                .with_delimiter(b'\t')
                .with_max_columns(4)
                .with_sniff_window(64),
        );
        let config = reader.config();
        assert_eq!(config.delimiter, b'\t');
        assert_eq!(config.max_columns, 4);
        assert_eq!(config.sniff_window, 64);
        assert_eq!(ReaderConfig::default().max_columns, DEFAULT_MAX_COLUMNS);
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("é").is_err());
    }
}
