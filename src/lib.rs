//! Measurement data analytics: CSV ingestion with per-row error accounting
//! and window-based smoothing of the loaded series.
//!
//! ```no_run
//! use mda::data::loader::{CsvDataReader, ReaderConfig};
//! use mda::data::smooth::{smooth, WindowKind};
//!
//! let report = CsvDataReader::new(ReaderConfig::default()).read("measurement.csv");
//! if let Ok(dataset) = &report.result {
//!     let y: Vec<f64> = dataset.column(1).into_iter().flatten().collect();
//!     let smoothed = smooth(&y, WindowKind::Hanning, 11);
//!     println!("{smoothed:?}");
//! }
//! print!("{}", mda::report::ErrorReport(&report));
//! ```

pub mod data;
pub mod report;
