use std::path::{Path, PathBuf};

use mda::data::loader::{parse_delimiter, CsvDataReader, ReaderConfig};
use mda::data::model::{Dataset, ReadReport};
use mda::data::series::{self, Axes};
use mda::data::smooth::{SmoothError, WindowSpec};
use mda::data::sniff::HeaderMode;

// ---------------------------------------------------------------------------
// Smoothed overlay
// ---------------------------------------------------------------------------

/// One smoothed version of the plotted series.
pub struct Overlay {
    pub window: WindowSpec,
    pub visible: bool,
    /// Smoothed points, or why they could not be computed.
    pub points: Result<Vec<[f64; 2]>, SmoothError>,
}

impl Overlay {
    fn compute(window: WindowSpec, raw: &[[f64; 2]]) -> Self {
        Overlay {
            window,
            visible: true,
            points: series::smoothed_points(raw, window),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Outcome of the last read (None until user loads a file).
    pub report: Option<ReadReport>,

    /// File the report was read from, for reloading.
    pub path: Option<PathBuf>,

    /// Reader settings used for the next (re)load.
    pub config: ReaderConfig,
    pub header_mode: HeaderMode,

    /// Delimiter as typed in the side panel.
    pub delimiter_text: String,

    /// Columns currently plotted.
    pub axes: Option<Axes>,

    /// Raw points of the plotted columns (rows with missing cells skipped).
    pub raw_points: Vec<[f64; 2]>,
    pub show_raw: bool,

    pub overlays: Vec<Overlay>,

    /// Window used by the next "Add overlay".
    pub pending_window: WindowSpec,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ReaderConfig::default(), HeaderMode::Auto)
    }
}

impl AppState {
    pub fn new(config: ReaderConfig, header_mode: HeaderMode) -> Self {
        Self {
            report: None,
            path: None,
            delimiter_text: char::from(config.delimiter).to_string(),
            config,
            header_mode,
            axes: None,
            raw_points: Vec::new(),
            show_raw: true,
            overlays: Vec::new(),
            pending_window: WindowSpec::default(),
            status_message: None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.report.as_ref().and_then(ReadReport::dataset)
    }

    /// Read `path` with the current settings and show the result.
    pub fn load(&mut self, path: &Path) {
        let reader = CsvDataReader::with_detector(self.config, self.header_mode);
        let report = reader.read(path);
        self.path = Some(path.to_path_buf());
        self.set_report(report);
    }

    /// Read the current file again, e.g. after changing the delimiter.
    pub fn reload(&mut self) {
        if let Err(e) = self.apply_delimiter_text() {
            self.status_message = Some(format!("Error: {e}"));
            return;
        }
        if let Some(path) = self.path.clone() {
            self.load(&path);
        }
    }

    /// Parse `delimiter_text` into the reader config.
    pub fn apply_delimiter_text(&mut self) -> Result<(), String> {
        self.config.delimiter = parse_delimiter(&self.delimiter_text)?;
        Ok(())
    }

    /// Ingest a read report. Overlays are kept and recomputed.
    pub fn set_report(&mut self, report: ReadReport) {
        match &report.result {
            Ok(ds) => {
                let names = ds.column_names();
                log::info!(
                    "Loaded {} rows with columns {:?} ({} error(s))",
                    ds.row_count(),
                    names,
                    report.log.count()
                );
                self.axes = Some(series::default_axes(ds));
                self.status_message = (!report.log.is_empty())
                    .then(|| format!("{} error(s) while reading", report.log.count()));
            }
            Err(e) => {
                log::error!("Failed to load '{}': {e}", report.source);
                self.axes = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.report = Some(report);
        self.rebuild();
    }

    /// Plot different columns.
    pub fn set_axes(&mut self, axes: Axes) {
        self.axes = Some(axes);
        self.rebuild();
    }

    /// Recompute raw points and every overlay from the dataset.
    pub fn rebuild(&mut self) {
        self.raw_points = match (self.dataset(), self.axes) {
            (Some(ds), Some(axes)) => series::points(ds, axes),
            _ => Vec::new(),
        };
        for overlay in &mut self.overlays {
            overlay.points = series::smoothed_points(&self.raw_points, overlay.window);
        }
    }

    pub fn add_overlay(&mut self, window: WindowSpec) {
        let overlay = Overlay::compute(window, &self.raw_points);
        if let Err(e) = &overlay.points {
            log::warn!("overlay {window}: {e}");
        }
        self.overlays.push(overlay);
    }

    pub fn remove_overlay(&mut self, index: usize) {
        if index < self.overlays.len() {
            self.overlays.remove(index);
        }
    }
}
