//! Tripsettle command line.
//!
//! Reads a JSON array of expenses, settles each currency independently and
//! prints the settlement views as JSON keyed by currency code.
//!
//! Usage: tripsettle <expenses.json>

use std::path::PathBuf;

use anyhow::{Context, bail};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripsettle_core::{Expense, SettlementCalculator};
use tripsettle_shared::AppConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("Usage: tripsettle <expenses.json>");
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let expenses: Vec<Expense> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse expenses in {}", path.display()))?;
    info!(path = %path.display(), expenses = expenses.len(), "Loaded expenses");

    let precision = config.currency.precision_table()?;
    let calculator = SettlementCalculator::from_config(precision, &config.settlement);

    let views = calculator
        .settle_by_currency(&expenses)
        .map_err(|err| anyhow::anyhow!("{}: {err}", err.error_code()))?;
    for (currency, view) in &views {
        info!(
            %currency,
            participants = view.summaries.len(),
            transfers = view.transfers.len(),
            residue = %view.residue,
            "Settled currency"
        );
    }

    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}
