//! Header detection.
//!
//! Whether the first record of a delimited file holds column names cannot be
//! decided with certainty, so the reader asks a [`HeaderDetector`]. The
//! default [`Sniffer`] votes column by column, comparing the first record
//! against the records that follow it.

use std::collections::BTreeMap;

/// Records after the candidate header that take part in the vote.
const SNIFF_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SniffError {
    #[error("sample contains no records")]
    EmptySample,
    #[error("sample could not be parsed: {0}")]
    Malformed(String),
}

/// Decides whether a sample of a file starts with a header record.
pub trait HeaderDetector {
    fn has_header(&self, sample: &[u8], delimiter: u8) -> Result<bool, SniffError>;
}

/// Always gives the same answer. Used to bypass the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeader(pub bool);

impl HeaderDetector for FixedHeader {
    fn has_header(&self, _sample: &[u8], _delimiter: u8) -> Result<bool, SniffError> {
        Ok(self.0)
    }
}

/// Content-based header heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sniffer;

/// What the cells of a column look like across the sampled records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnClass {
    Numeric,
    Text(usize),
}

fn classify(field: &[u8]) -> ColumnClass {
    match std::str::from_utf8(field) {
        Ok(s) if s.trim().parse::<f64>().is_ok() => ColumnClass::Numeric,
        _ => ColumnClass::Text(field.len()),
    }
}

impl HeaderDetector for Sniffer {
    fn has_header(&self, sample: &[u8], delimiter: u8) -> Result<bool, SniffError> {
        let mut records = parse_sample(sample, delimiter)?.into_iter();
        let header = records.next().ok_or(SniffError::EmptySample)?;
        let width = header.len();

        // `None` once a column has been seen with two different classes.
        let mut classes: BTreeMap<usize, Option<ColumnClass>> = BTreeMap::new();
        for record in records.filter(|r| r.len() == width).take(SNIFF_ROWS) {
            for (col, field) in record.iter().enumerate() {
                let class = classify(field);
                classes
                    .entry(col)
                    .and_modify(|seen| {
                        if *seen != Some(class) {
                            *seen = None;
                        }
                    })
                    .or_insert(Some(class));
            }
        }

        let mut votes: i64 = 0;
        for (col, class) in classes {
            let Some(class) = class else { continue };
            let candidate = &header[col];
            let fits = match class {
                ColumnClass::Numeric => classify(candidate) == ColumnClass::Numeric,
                ColumnClass::Text(len) => candidate.len() == len,
            };
            votes += if fits { -1 } else { 1 };
        }

        log::debug!("header sniff: {votes} vote(s) over {width} column(s)");
        Ok(votes > 0)
    }
}

/// How the reader decides about a header record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Ask the [`Sniffer`].
    #[default]
    Auto,
    Present,
    Absent,
}

impl HeaderMode {
    pub const ALL: [HeaderMode; 3] = [HeaderMode::Auto, HeaderMode::Present, HeaderMode::Absent];

    pub fn name(self) -> &'static str {
        match self {
            HeaderMode::Auto => "auto",
            HeaderMode::Present => "present",
            HeaderMode::Absent => "absent",
        }
    }
}

impl std::str::FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("header mode must be auto, present or absent, got '{s}'"))
    }
}

impl HeaderDetector for HeaderMode {
    fn has_header(&self, sample: &[u8], delimiter: u8) -> Result<bool, SniffError> {
        match self {
            HeaderMode::Auto => Sniffer.has_header(sample, delimiter),
            HeaderMode::Present => Ok(true),
            HeaderMode::Absent => Ok(false),
        }
    }
}

/// Leading window of `bytes` handed to a detector. When the window cuts a
/// record in half, the partial record is left out.
pub fn sample_window(bytes: &[u8], window: usize) -> &[u8] {
    if bytes.len() <= window {
        return bytes;
    }
    let head = &bytes[..window];
    match head.iter().rposition(|&b| b == b'\n') {
        Some(pos) => &head[..=pos],
        None => head,
    }
}

fn parse_sample(sample: &[u8], delimiter: u8) -> Result<Vec<Vec<Vec<u8>>>, SniffError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample);

    reader
        .byte_records()
        .map(|r| {
            r.map(|rec| rec.iter().map(<[u8]>::to_vec).collect())
                .map_err(|e| SniffError::Malformed(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(text: &str) -> bool {
        Sniffer.has_header(text.as_bytes(), b',').unwrap()
    }

    #[test]
    fn numeric_columns_under_text_header() {
        assert!(sniff("time,dose\n0.0,1.5\n0.5,1.7\n1.0,1.6\n"));
    }

    #[test]
    fn all_numeric_has_no_header() {
        assert!(!sniff("0.0,1.5\n0.5,1.7\n1.0,1.6\n"));
    }

    #[test]
    fn single_record_gives_no_evidence() {
        assert!(!sniff("time,dose\n"));
    }

    #[test]
    fn fixed_length_text_column_votes() {
        // Second column is always three characters long; the header is not.
        assert!(sniff("x,label\n1,abc\n2,def\n3,ghi\n"));
    }

    #[test]
    fn window_drops_partial_record() {
        let bytes = b"a;b\n1;2\n3;4\n5;name\n";
        assert_eq!(sample_window(bytes, 14), b"a;b\n1;2\n3;4\n");
        assert_eq!(sample_window(bytes, 1024), &bytes[..]);
        assert_eq!(sample_window(b"abcdef", 3), b"abc");
    }

    #[test]
    fn semicolon_delimiter() {
        assert!(Sniffer
            .has_header(b"t;v\n1;2\n3;4\n", b';')
            .unwrap());
        // With the wrong delimiter every record is a single three-byte text
        // field, the same width as the first one.
        assert!(!Sniffer.has_header(b"t;v\n1;2\n3;4\n", b',').unwrap());
    }

    #[test]
    fn empty_sample_is_an_error() {
        assert_eq!(Sniffer.has_header(b"", b','), Err(SniffError::EmptySample));
    }

    #[test]
    fn header_mode_dispatch() {
        let sample = b"t,v\n1,2\n3,4\n";
        assert!(HeaderMode::Auto.has_header(sample, b',').unwrap());
        assert!(!HeaderMode::Absent.has_header(sample, b',').unwrap());
        assert!(HeaderMode::Present.has_header(b"1,2\n", b',').unwrap());
        assert_eq!("Present".parse::<HeaderMode>(), Ok(HeaderMode::Present));
        assert!("maybe".parse::<HeaderMode>().is_err());
    }

    #[test]
    fn fixed_header_ignores_content() {
        assert!(FixedHeader(true).has_header(b"1,2\n", b',').unwrap());
        assert!(!FixedHeader(false).has_header(b"a,b\n", b',').unwrap());
    }
}
