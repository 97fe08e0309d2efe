//! Command-line variant: read a CSV file and print the error report.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use mda::data::loader::{parse_delimiter, CsvDataReader, ReaderConfig, DEFAULT_MAX_COLUMNS};
use mda::data::sniff::HeaderMode;
use mda::report::{DataTable, ErrorReport};

const LICENSE_NOTICE: &str = "License MIT: <https://opensource.org/licenses/MIT>\n\
This is free software: you are free to change and redistribute it.\n\
There is NO WARRANTY, to the extent permitted by law.";

/// Small tool used to inspect and validate 2D graph data.
#[derive(Parser, Debug)]
#[command(
    name = "mda-report",
    about,
    disable_version_flag = true,
    after_help = "Mandatory arguments to long options are mandatory for short options too."
)]
struct Args {
    /// Print program version
    #[arg(short = 'V', long)]
    version: bool,

    /// Give a short usage message
    #[arg(long)]
    usage: bool,

    /// Field delimiter. Default value is ","
    #[arg(short, long, value_name = "DELIMITER", value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Maximum number of data columns
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_COLUMNS)]
    max_columns: usize,

    /// Header detection: auto, present or absent
    #[arg(long, value_name = "MODE", default_value = "auto")]
    header: HeaderMode,

    /// Print the parsed table after the report
    #[arg(long)]
    print_data: bool,

    /// Print the read report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// A CSV file containing graph data
    #[arg(value_name = "DATA_FILE")]
    data_file: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    let mut cmd = Args::command();
    let prog = cmd.get_name().to_string();

    if args.usage {
        println!("{}", cmd.render_usage());
        println!("Try '{prog} --help' for more information.");
        return Ok(ExitCode::SUCCESS);
    }

    if args.version {
        println!("{prog} {}", env!("CARGO_PKG_VERSION"));
        println!("{LICENSE_NOTICE}");
        return Ok(ExitCode::SUCCESS);
    }

    let Some(data_file) = args.data_file else {
        println!("{prog}: Missing data file argument.");
        return Ok(ExitCode::from(2));
    };

    if !data_file.is_file() {
        println!(
            "{prog}: File '{}' does not exist or is directory.",
            data_file.display()
        );
        return Ok(ExitCode::from(2));
    }

    let mut config = ReaderConfig::default().with_max_columns(args.max_columns);
    if let Some(delimiter) = args.delimiter {
        config = config.with_delimiter(delimiter);
    }
    let reader = CsvDataReader::with_detector(config, args.header);

    if !args.json {
        println!("{prog}: Reading file '{}'.\n\n", data_file.display());
    }
    let report = reader.read(&data_file);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serializing read report")?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    print!("{}", ErrorReport(&report));
    println!("\n");

    if args.print_data {
        if let Some(dataset) = report.dataset() {
            print!("{}", DataTable(dataset));
        }
    }

    Ok(ExitCode::SUCCESS)
}
