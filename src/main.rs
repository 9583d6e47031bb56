use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use structured_logger::json::new_writer;
use structured_logger::Builder;

use osm_waterbodies::errors::{Error, Result};
use osm_waterbodies::{run_extraction, UserConfig};

/// Extract streams, rivers, canals, lakes, ponds and reservoirs from an OSM JSON export.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON config file with input and output paths.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input OSM JSON document (overrides the config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for streams, rivers and canals.
    #[arg(long)]
    linear_out: Option<PathBuf>,

    /// Output file for lakes, ponds and reservoirs.
    #[arg(long)]
    areal_out: Option<PathBuf>,

    /// Log level, e.g. "debug" or "warn".
    #[arg(long)]
    log_level: Option<String>,

    /// Rewrite outputs that already exist.
    #[arg(short, long)]
    force: bool,
}

impl Cli {
    fn into_config(self) -> Result<UserConfig> {
        let mut config = match (&self.config, self.input, self.linear_out, self.areal_out) {
            (Some(path), input, linear, areal) => {
                let mut config = UserConfig::load(path)?;
                if let Some(input) = input {
                    config.input_path = input;
                }
                if let Some(linear) = linear {
                    config.linear_output_path = linear;
                }
                if let Some(areal) = areal {
                    config.areal_output_path = areal;
                }
                config
            }
            (None, Some(input), Some(linear), Some(areal)) => UserConfig::new(input, linear, areal),
            (None, ..) => {
                return Err(Error::Config(
                    "either --config or all of --input, --linear-out and --areal-out are required"
                        .to_string(),
                ))
            }
        };
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.overwrite |= self.force;
        config.validate()?;
        Ok(config)
    }
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn run(config: &UserConfig) -> Result<()> {
    if let Some(report) = run_extraction(config)? {
        info!(
            linear = report.linear,
            areal = report.areal,
            unmatched = report.unmatched,
            skipped = report.skipped();
            "Extraction summary"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}: {err}", err.category());
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err.to_string();
            error!(category = err.category(), err = message.as_str(); "Operation failed");
            eprintln!("The process has failed: {}: {err}", err.category());
            ExitCode::FAILURE
        }
    }
}
