use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// ReadError – everything that can go wrong while reading a table
// ---------------------------------------------------------------------------

/// Errors reported by [`CsvDataReader`](super::loader::CsvDataReader).
///
/// Fatal variants abort the read and no [`Dataset`] is produced. The others
/// are recorded in the [`ErrorLog`] and reading continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("Empty file")]
    EmptyFile,
    #[error("No table data could be found")]
    NoData,
    #[error("Too many data columns ({found}, at most {max} allowed)")]
    TooManyColumns { found: usize, max: usize },
    #[error("Unable to read '{source_name}': {message}")]
    Io { source_name: String, message: String },
    #[error("Row width too small ({found} of {expected} fields)")]
    RowWidthTooSmall { expected: usize, found: usize },
    #[error("Row width too big ({found} of {expected} fields)")]
    RowWidthTooBig { expected: usize, found: usize },
    #[error("Could not convert '{text}' to float in column {column}")]
    InvalidValue { column: usize, text: String },
    #[error("Could not determine header: {0}")]
    HeaderDetection(String),
}

impl ReadError {
    /// Whether this error terminates the read without producing a dataset.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReadError::EmptyFile
                | ReadError::NoData
                | ReadError::TooManyColumns { .. }
                | ReadError::Io { .. }
        )
    }
}

impl Serialize for ReadError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// ErrorLog – ordered (row, error) pairs collected during one read
// ---------------------------------------------------------------------------

/// One logged error. Row 0 is the file / header level, rows ≥ 1 are 1-based
/// data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub row: usize,
    pub error: ReadError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorLog {
    entries: Vec<LogEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: usize, error: ReadError) {
        self.entries.push(LogEntry { row, error });
    }

    /// Number of errors encountered.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently logged error.
    pub fn last(&self) -> Option<&ReadError> {
        self.entries.last().map(|e| &e.error)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries logged against a given row.
    pub fn for_row(&self, row: usize) -> impl Iterator<Item = &ReadError> {
        self.entries
            .iter()
            .filter(move |e| e.row == row)
            .map(|e| &e.error)
    }
}

// ---------------------------------------------------------------------------
// Dataset – fixed-shape numeric matrix with optional headers
// ---------------------------------------------------------------------------

/// A single matrix cell; `None` marks a value that could not be parsed.
pub type Cell = Option<f64>;

/// Rectangular numeric table. The shape is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    rows: usize,
    columns: usize,
    /// Row-major cells, `rows * columns` long.
    cells: Vec<Cell>,
    headers: Option<Vec<String>>,
}

impl Dataset {
    /// Zero-initialised matrix of the given shape.
    pub fn zeroed(rows: usize, columns: usize) -> Self {
        Dataset {
            rows,
            columns,
            cells: vec![Some(0.0); rows * columns],
            headers: None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Cell at `(row, column)`, both 0-based. `None` outside the matrix.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.cells[row * self.columns + column])
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, cell: Cell) {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells[row * self.columns + column] = cell;
    }

    /// Mark every cell of a row as missing.
    pub(crate) fn clear_row(&mut self, row: usize) {
        let start = row * self.columns;
        self.cells[start..start + self.columns].fill(None);
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `max(1)` keeps `chunks` valid for the (unreachable) zero-column case.
        self.cells.chunks(self.columns.max(1))
    }

    /// Copy of one column, top to bottom. All missing if `column` is out of range.
    pub fn column(&self, column: usize) -> Vec<Cell> {
        (0..self.rows).map(|r| self.get(r, column).flatten()).collect()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Headers captured from the file, if it had a header record.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    pub(crate) fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = Some(headers);
    }

    /// Captured headers, or `Column 1`..`Column N` when the file had none.
    pub fn column_names(&self) -> Vec<String> {
        match &self.headers {
            Some(h) => (0..self.columns)
                .map(|i| h.get(i).cloned().unwrap_or_else(|| default_column_name(i)))
                .collect(),
            None => (0..self.columns).map(default_column_name).collect(),
        }
    }
}

/// Default name for the 0-based column `index`.
pub fn default_column_name(index: usize) -> String {
    format!("Column {}", index + 1)
}

// ---------------------------------------------------------------------------
// ReadReport – the result of one read
// ---------------------------------------------------------------------------

/// Dataset (or the fatal reason there is none) together with the error log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadReport {
    /// File name or other label of what was read.
    pub source: String,
    #[serde(serialize_with = "serialize_result")]
    pub result: Result<Dataset, ReadError>,
    pub log: ErrorLog,
}

impl ReadReport {
    pub fn dataset(&self) -> Option<&Dataset> {
        self.result.as_ref().ok()
    }
}

fn serialize_result<S: serde::Serializer>(
    result: &Result<Dataset, ReadError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(ds) => map.serialize_entry("dataset", ds)?,
        Err(e) => map.serialize_entry("failure", e)?,
    }
    map.end()
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}.", self.row, self.error)
    }
}
