//! Ordercast CLI — evaluation, inspection, and calendar commands.
//!
//! Commands:
//! - `run` — evaluate the naive moving-average forecast from a TOML config
//!   or direct flags, writing the artifact set
//! - `inspect` — summarize the daily series and its autocorrelation
//! - `holidays` — print the observed exchange-holiday calendar
//! - `synthetic` — write a deterministic synthetic order CSV

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ordercast_core::aggregate::aggregate_daily;
use ordercast_core::calendar::{derive_calendar_fields, holidays_for_year, HolidaySet};
use ordercast_core::data::load_orders;
use ordercast_core::stats::{autocorrelation, mean, std_dev};
use ordercast_runner::{
    export_orders_csv, generate_synthetic_orders, run_evaluation, save_artifacts, EvalConfig,
    EvalResult, RunOptions,
};

#[derive(Parser)]
#[command(
    name = "ordercast",
    about = "Ordercast CLI — daily order-demand aggregation and forecast evaluation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the naive moving-average forecast against a train/test split.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Order CSV (required without --config).
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Train/test cutoff date (YYYY-MM-DD; required without --config).
        #[arg(long)]
        cutoff: Option<String>,

        /// Trailing moving-average window in days.
        #[arg(long, default_value_t = 30)]
        window: usize,

        /// Generate synthetic orders when the CSV is missing.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Summarize the daily series: span, totals, head rows, autocorrelation.
    Inspect {
        /// Order CSV.
        #[arg(long)]
        csv: PathBuf,

        /// Number of head rows to print.
        #[arg(long, default_value_t = 10)]
        head: usize,

        /// Highest autocorrelation lag to print.
        #[arg(long, default_value_t = 12)]
        lags: usize,
    },
    /// Print the observed exchange-holiday calendar for the given years.
    Holidays {
        /// Years to print (e.g., 2003 2004 2005).
        #[arg(required = true)]
        years: Vec<i32>,
    },
    /// Write a deterministic synthetic order CSV.
    Synthetic {
        /// Output CSV path.
        #[arg(long, default_value = "synthetic_orders.csv")]
        out: PathBuf,

        /// Seed label; the same label always produces the same orders.
        #[arg(long, default_value = "ordercast")]
        seed: String,

        /// First order date (YYYY-MM-DD).
        #[arg(long, default_value = "2003-01-02")]
        start: String,

        /// Last order date (YYYY-MM-DD).
        #[arg(long, default_value = "2005-05-31")]
        end: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            csv,
            cutoff,
            window,
            synthetic,
            output_dir,
        } => run_cmd(config, csv, cutoff, window, synthetic, output_dir),
        Commands::Inspect { csv, head, lags } => inspect_cmd(&csv, head, lags),
        Commands::Holidays { years } => holidays_cmd(&years),
        Commands::Synthetic {
            out,
            seed,
            start,
            end,
        } => synthetic_cmd(&out, &seed, &start, &end),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    csv: Option<PathBuf>,
    cutoff: Option<String>,
    window: usize,
    synthetic: bool,
    output_dir: PathBuf,
) -> Result<()> {
    if config_path.is_some() && (csv.is_some() || cutoff.is_some()) {
        bail!("--config and --csv/--cutoff are mutually exclusive");
    }

    let config = if let Some(path) = config_path {
        EvalConfig::from_file(&path)?
    } else {
        let (Some(csv), Some(cutoff)) = (csv, cutoff) else {
            bail!("either --config or both --csv and --cutoff are required");
        };
        let mut config = EvalConfig::new(csv.display().to_string(), cutoff);
        config.evaluation.window = window;
        config.validate()?;
        config
    };

    let result = run_evaluation(&config, &RunOptions { synthetic })?;

    print_summary(&result);

    let run_dir = save_artifacts(&result, &output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn print_summary(result: &EvalResult) {
    println!();
    println!("=== Evaluation Result ===");
    println!("Input:          {}", result.csv_path);
    println!(
        "Records:        {} over {} trading days",
        result.record_count, result.day_count
    );
    println!("Dataset hash:   {}", &result.dataset_hash[..result.dataset_hash.len().min(16)]);
    println!("Calendar years: {:?}", result.calendar_years);
    println!();
    println!("--- Forecast ---");
    println!("Cutoff:         {}", result.cutoff_date);
    println!("Window:         {} days", result.window);
    println!(
        "Split:          {} train / {} test days",
        result.train_days, result.test_days
    );
    println!("Last train MA:  {:.2}", result.last_train_ma);
    println!("MAE:            {:.2}", result.mae);
    if result.has_synthetic {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
}

fn inspect_cmd(csv: &std::path::Path, head: usize, lags: usize) -> Result<()> {
    let records = load_orders(csv)?;
    let series = aggregate_daily(&records);
    if series.is_empty() {
        bail!("'{}' contains no order rows", csv.display());
    }

    let holidays = HolidaySet::for_years(&series.years());
    let augmented = derive_calendar_fields(&series, &holidays);
    let quantities = augmented.quantities();

    println!("=== Daily Series ===");
    println!(
        "Span:           {} to {} ({} days, {} records)",
        series.first_date().expect("non-empty series"),
        series.last_date().expect("non-empty series"),
        series.len(),
        records.len()
    );
    println!("Total quantity: {}", series.total_quantity());
    println!(
        "Daily mean/std: {:.2} / {:.2}",
        mean(&quantities),
        std_dev(&quantities)
    );

    println!();
    println!("date        wday  qty    holiday");
    for p in augmented.points.iter().take(head) {
        println!(
            "{}  {}   {:<6} {}",
            p.date,
            p.weekday,
            p.total_quantity,
            if p.holiday { "1" } else { "0" }
        );
    }
    if augmented.len() > head {
        println!("... {} more days", augmented.len() - head);
    }

    println!();
    println!("--- Autocorrelation ---");
    let acf = autocorrelation(&quantities, lags);
    for (lag, value) in acf.iter().enumerate().skip(1) {
        if value.is_nan() {
            println!("lag {lag:>3}: undefined");
        } else {
            println!("lag {lag:>3}: {value:+.4}");
        }
    }

    Ok(())
}

fn holidays_cmd(years: &[i32]) -> Result<()> {
    for &year in years {
        println!("=== {year} ===");
        for (name, date) in holidays_for_year(year) {
            println!("{date}  {name}");
        }
        println!();
    }
    Ok(())
}

fn synthetic_cmd(out: &std::path::Path, seed: &str, start: &str, end: &str) -> Result<()> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")?;
    if end < start {
        bail!("--end must not precede --start");
    }

    let records = generate_synthetic_orders(seed, start, end);
    std::fs::write(out, export_orders_csv(&records)?)?;
    println!(
        "Wrote {} synthetic orders ({} to {}) to {}",
        records.len(),
        start,
        end,
        out.display()
    );
    Ok(())
}
