// Municipal Records - command-line front end for period checks

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use municipal_records::{
    display_date, load_period_options, parse_date_flexible, parse_iso_date, period_end,
    Frequency, PeriodOptions, RecordStatus, RecordTerms, Rounding, StatusBadge,
};

/// Renewal period and delinquency checks for municipal records
#[derive(Parser)]
#[command(name = "municipal-records")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Period policy file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the end of the billing period for a record date
    PeriodEnd {
        /// Record date (MM/DD/YYYY or YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// quarterly, semi-annual or annual
        #[arg(short, long)]
        frequency: Frequency,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Show the expired date and delinquency status of a record
    Check {
        /// Record date (MM/DD/YYYY or YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// quarterly, semi-annual or annual
        #[arg(short, long)]
        frequency: Frequency,

        /// Record has been marked renewed
        #[arg(long)]
        renewed: bool,

        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        now: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Command-line overrides for the policy file
#[derive(Args)]
struct PolicyArgs {
    /// fixed or rolling
    #[arg(long)]
    rounding: Option<Rounding>,

    /// Credit payments this many days before a fixed boundary to the next period
    #[arg(long)]
    early_rollover_days: Option<u32>,
}

impl PolicyArgs {
    fn apply(&self, mut options: PeriodOptions) -> PeriodOptions {
        if let Some(rounding) = self.rounding {
            options.rounding = rounding;
        }
        if let Some(days) = self.early_rollover_days {
            options.early_rollover_days = days;
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = match &cli.config {
        Some(path) => load_period_options(path)?,
        None => PeriodOptions::default(),
    };

    match &cli.command {
        Commands::PeriodEnd {
            date,
            frequency,
            policy,
        } => run_period_end(date, *frequency, &policy.apply(base)),
        Commands::Check {
            date,
            frequency,
            renewed,
            now,
            policy,
        } => run_check(date, *frequency, *renewed, now.as_deref(), &policy.apply(base)),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_period_end(date: &str, frequency: Frequency, options: &PeriodOptions) -> Result<()> {
    debug!(?options, %frequency, "computing period end");

    let end = parse_date_flexible(date).and_then(|parsed| period_end(parsed, frequency, options));
    println!("{}", display_date(end));

    if end.is_none() {
        bail!("could not parse record date {:?}", date);
    }

    Ok(())
}

fn run_check(
    date: &str,
    frequency: Frequency,
    renewed: bool,
    now: Option<&str>,
    options: &PeriodOptions,
) -> Result<()> {
    let now = match now {
        Some(text) => parse_iso_date(text)?
            .and_hms_opt(0, 0, 0)
            .context("invalid --now date")?,
        None => chrono::Local::now().naive_local(),
    };

    let record = RecordTerms::new(date, frequency.as_str(), renewed);
    let status = RecordStatus::evaluate(&record, options, now);

    println!("📅 Expired date: {}", status.expired_date);
    println!("🏷️  Status:       {}", status.status);

    if status.status == StatusBadge::InvalidDate {
        bail!("could not parse record date {:?}", date);
    }

    Ok(())
}
