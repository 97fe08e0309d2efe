mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::MdaApp;
use clap::Parser;
use eframe::egui;

use mda::data::loader::{parse_delimiter, ReaderConfig, DEFAULT_MAX_COLUMNS};
use mda::data::sniff::HeaderMode;
use state::AppState;

/// Small GUI app to inspect and smooth 2D measurement data.
#[derive(Parser, Debug)]
#[command(name = "mda", version, about)]
struct Args {
    /// Field delimiter (single character, `\t` for tab)
    #[arg(short, long, value_name = "DELIMITER", default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Maximum number of data columns
    #[arg(long, default_value_t = DEFAULT_MAX_COLUMNS)]
    max_columns: usize,

    /// Header detection: auto, present or absent
    #[arg(long, default_value = "auto")]
    header: HeaderMode,

    /// CSV file containing graph data
    #[arg(value_name = "DATA_FILE")]
    data_file: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let config = ReaderConfig::default()
        .with_delimiter(args.delimiter)
        .with_max_columns(args.max_columns);
    let mut state = AppState::new(config, args.header);
    if let Some(path) = &args.data_file {
        log::info!("Reading file '{}'", path.display());
        state.load(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "mda – Measurement Data Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(MdaApp::new(state)))),
    )
}
