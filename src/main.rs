//! neutosc command-line driver
//!
//! # Usage
//!
//! ```bash
//! # Probabilities for the configured parameters
//! neutosc point
//!
//! # Energy sweep written to nu.csv
//! neutosc --config run.json sweep --parameter energy --steps 1000
//!
//! # Euler trajectory over the configured baseline
//! neutosc trajectory --step 0.1 --output trajectory.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use neutosc::{export_csv, par_sweep, sweep, Config, Flavour, Oscillator, Result, SweepParameter};

/// Three-flavour neutrino oscillation probabilities
#[derive(Parser)]
#[command(name = "neutosc")]
#[command(version)]
#[command(about = "Neutrino oscillation probabilities in vacuum and constant-density matter")]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the configured parameters once
    Point,

    /// Sweep one parameter from zero to its configured value
    Sweep {
        /// Parameter to sweep
        #[arg(short, long)]
        parameter: Option<SweepParameter>,

        /// Number of samples
        #[arg(short, long)]
        steps: Option<usize>,

        /// Evaluate samples in parallel
        #[arg(long)]
        parallel: bool,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Integrate the evolution equation step by step over the configured baseline
    Trajectory {
        /// Step size in km
        #[arg(long)]
        step: Option<f64>,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }
    init_logging(&config.logging.level);

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn run(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Point => {
            config.validate()?;
            let oscillator = Oscillator::new(config.parameters)?.with_subdivisions(config.engine.subdivisions)?;
            let p = oscillator.evaluate();
            println!("{}", oscillator.parameters());
            for flavour in Flavour::ALL {
                println!("  P({} -> {}) = {:.6}", oscillator.parameters().initial_flavour, flavour, p[flavour.index()]);
            }
            if !oscillator.parameters().is_vacuum() {
                println!("  matter error bound: {:.3e}", oscillator.matter_error_bound());
            }
        }
        Commands::Sweep { parameter, steps, parallel, output } => {
            if let Some(parameter) = parameter {
                config.sweep.parameter = parameter;
            }
            if let Some(steps) = steps {
                config.sweep.steps = steps;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            config.sweep.parallel |= parallel;
            config.validate()?;

            let oscillator = Oscillator::new(config.parameters)?.with_subdivisions(config.engine.subdivisions)?;
            info!(parameter = %config.sweep.parameter, steps = config.sweep.steps, "sweeping");
            let curve = if config.sweep.parallel {
                par_sweep(&oscillator, config.sweep.parameter, config.sweep.steps)?
            } else {
                sweep(&oscillator, config.sweep.parameter, config.sweep.steps)?
            };
            let path = export_csv(&curve, &config.output.path)?;
            println!("Saving to {}.", path.display());
        }
        Commands::Trajectory { step, output } => {
            if let Some(step) = step {
                config.engine.step = step;
            }
            if let Some(output) = output {
                config.output.path = output;
            }
            config.validate()?;

            let oscillator = Oscillator::new(config.parameters)?;
            let p = oscillator.parameters();
            let curve = oscillator.integrate(p.initial_flavour, p.energy, p.length, config.engine.step)?;
            let path = export_csv(&curve, &config.output.path)?;
            println!("Saving to {}.", path.display());
        }
    }
    Ok(())
}
