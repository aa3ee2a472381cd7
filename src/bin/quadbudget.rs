//! quadbudget CLI
//!
//! Finds the sample counts the midpoint rule and two Monte Carlo estimators
//! need to integrate sin(x) over an interval to a set of accuracy targets.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quadbudget::math::integration::{midpoint::MidpointRule, Estimator, Interval};
use quadbudget::math::monte_carlo::{DartEstimator, MeanValueEstimator, SegmentEstimator};
use quadbudget::math::search::SearchConfig;
use quadbudget::math::sweep::{run_sweep, SweepConfig};
use quadbudget::report::{render_json, render_table};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadbudget")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the sample count each method needs for every accuracy target
    Sweep {
        #[command(flatten)]
        domain: DomainArgs,

        /// Relative accuracy targets, each in (0, 1)
        #[arg(long, value_delimiter = ',', default_value = "0.9,0.99,0.999,0.99999")]
        accuracies: Vec<f64>,

        /// Confidence level of the acceptance interval
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,

        /// Smallest Monte Carlo sample count considered
        #[arg(long, default_value_t = 100)]
        min_samples: usize,

        /// Largest Monte Carlo sample count considered
        #[arg(long, default_value_t = 1_000_000)]
        max_samples: usize,

        /// Trials per candidate below the batch size threshold
        #[arg(long, default_value_t = 30)]
        small_batch_trials: usize,

        /// Trials per candidate at or above the batch size threshold
        #[arg(long, default_value_t = 20)]
        large_batch_trials: usize,

        /// Sample count at which candidates switch to the large batch size
        #[arg(long, default_value_t = 10_000)]
        batch_size_threshold: usize,

        /// Trials used to re-check the bisection result
        #[arg(long, default_value_t = 30)]
        validation_trials: usize,

        /// Increment per fallback step
        #[arg(long, default_value_t = 100)]
        fallback_step: usize,

        /// Trials per fallback step
        #[arg(long, default_value_t = 20)]
        fallback_trials: usize,

        /// Iteration cap for the midpoint scan
        #[arg(long, default_value_t = 1_000_000)]
        max_rect_iterations: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Print a single estimate from one method
    Estimate {
        #[command(flatten)]
        domain: DomainArgs,

        /// Estimation method
        #[arg(long, value_enum)]
        method: Method,

        /// Sample (or partition) count
        #[arg(short = 'n', long)]
        samples: usize,
    },
}

#[derive(Args)]
struct DomainArgs {
    /// Lower integration bound
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lower: f64,

    /// Upper integration bound
    #[arg(long, default_value_t = std::f64::consts::PI, allow_negative_numbers = true)]
    upper: f64,

    /// Known value of the integral
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    true_value: f64,

    /// Upper bound of the integrand, used by the dart estimator
    #[arg(long, default_value_t = 1.0)]
    dart_height: f64,

    /// Seed for reproducible runs
    #[arg(long, env = "QUADBUDGET_SEED")]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Rect,
    Mean,
    Dart,
    Segment,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sweep {
            domain,
            accuracies,
            confidence,
            min_samples,
            max_samples,
            small_batch_trials,
            large_batch_trials,
            batch_size_threshold,
            validation_trials,
            fallback_step,
            fallback_trials,
            max_rect_iterations,
            format,
        } => {
            let config = SweepConfig {
                interval: Interval::new(domain.lower, domain.upper)?,
                true_value: domain.true_value,
                dart_height: domain.dart_height,
                accuracies,
                search: SearchConfig {
                    confidence,
                    min_samples,
                    max_samples,
                    small_batch_trials,
                    large_batch_trials,
                    batch_size_threshold,
                    validation_trials,
                    fallback_step,
                    fallback_trials,
                },
                max_rect_iterations,
                seed: domain.seed,
            };
            let rows = run_sweep(f64::sin, &config)?;
            match format {
                Format::Table => print!("{}", render_table(&rows)),
                Format::Json => {
                    println!("{}", render_json(&rows).context("failed to serialise rows")?)
                }
            }
        }
        Commands::Estimate {
            domain,
            method,
            samples,
        } => {
            let interval = Interval::new(domain.lower, domain.upper)?;
            let seed = domain.seed;
            let estimate = match method {
                Method::Rect => MidpointRule::new(f64::sin, interval).estimate(samples),
                Method::Mean => match seed {
                    Some(seed) => MeanValueEstimator::seeded(f64::sin, interval, seed),
                    None => MeanValueEstimator::from_entropy(f64::sin, interval),
                }
                .estimate(samples),
                Method::Dart => match seed {
                    Some(seed) => {
                        DartEstimator::seeded(f64::sin, interval, domain.dart_height, seed)?
                    }
                    None => DartEstimator::from_entropy(f64::sin, interval, domain.dart_height)?,
                }
                .estimate(samples),
                Method::Segment => match seed {
                    Some(seed) => SegmentEstimator::seeded(f64::sin, interval, seed),
                    None => SegmentEstimator::from_entropy(f64::sin, interval),
                }
                .estimate(samples),
            };
            println!(
                "{estimate:.10} (error {:.3e})",
                (estimate - domain.true_value).abs()
            );
        }
    }

    Ok(())
}
