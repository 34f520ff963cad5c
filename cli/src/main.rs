mod config;
mod error;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::{debug, info};
use stride_regression::dataset::{load_csv, partition_by_age, AgePartition};
use stride_regression::model::{fit_groups, GroupModels};
use stride_regression::OrdinaryLeastSquares;

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::report::{PredictionReport, StatsReport};

#[derive(Parser)]
#[command(name = "stride-model", version)]
#[command(about = "Fit stride-to-distance regression models for 3-year-olds and 4+ year-olds")]
struct Cli {
    /// TOML file overriding the built-in fit options
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit both age groups and print their diagnostics
    Stats {
        /// CSV with columns age,sps_avg,sl_avg,distance
        #[arg(short, long)]
        data: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Predict the optimal race distance for one horse
    Predict {
        /// CSV with columns age,sps_avg,sl_avg,distance
        #[arg(short, long)]
        data: PathBuf,

        /// Age in years (3 uses the 3-year-old model, older horses the 4+ model)
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(3..))]
        age: u32,

        /// Average strides per second (Hz)
        #[arg(long, default_value_t = 2.30)]
        sps: f64,

        /// Average stride length (metres)
        #[arg(long, default_value_t = 7.5)]
        sl: f64,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn fit_from_csv(path: &Path, config: &AppConfig) -> CliResult<(GroupModels, AgePartition)> {
    let records = load_csv(path)?;
    let partition = partition_by_age(&records)?;
    let regressor = OrdinaryLeastSquares::new(config.fit);
    debug!("fitting with {:?}", regressor.options());
    Ok((fit_groups(&regressor, &partition), partition))
}

fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    info!(
        "min_samples = {}, tolerance = {:?}",
        config.fit.min_samples, config.fit.tolerance
    );

    match cli.command {
        Command::Stats { data, json } => {
            let (models, partition) = fit_from_csv(&data, &config)?;
            let report = StatsReport::new(&models, partition.skipped);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Predict {
            data,
            age,
            sps,
            sl,
            json,
        } => {
            let (models, _) = fit_from_csv(&data, &config)?;
            let report = PredictionReport::new(&models, age, sps, sl)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
