//! Forecast and target commands over a JSON sales ledger.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::info;

use acente_core::models::config::AcenteConfig;
use acente_core::{
    ForecastResult, InMemoryLedger, Period, Scope, TargetProgress, TrendForecaster,
};

/// Ledger selection and scoping shared by forecast and target.
#[derive(Args)]
pub struct LedgerArgs {
    /// Ledger file: {"sales": [...], "targets": [...]}
    #[arg(short, long, required = true)]
    ledger: PathBuf,

    /// Restrict to a branch
    #[arg(long)]
    branch: Option<String>,

    /// Restrict to a salesperson
    #[arg(long)]
    user: Option<String>,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    text: bool,
}

impl LedgerArgs {
    fn scope(&self) -> Scope {
        Scope {
            branch_id: self.branch.clone(),
            user_id: self.user.clone(),
        }
    }

    fn forecaster(&self, config: &AcenteConfig) -> anyhow::Result<TrendForecaster<InMemoryLedger>> {
        if !self.ledger.exists() {
            anyhow::bail!("Ledger file not found: {}", self.ledger.display());
        }
        let ledger = InMemoryLedger::from_file(&self.ledger)?;
        Ok(TrendForecaster::new(ledger).with_config(config.forecast.clone()))
    }
}

/// Arguments for the forecast command.
#[derive(Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Reference date; its month is the latest month of history (default: today)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

/// Arguments for the target command.
#[derive(Args)]
pub struct TargetArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Month (1-12)
    #[arg(short, long)]
    month: u32,

    /// Year
    #[arg(short, long)]
    year: i32,
}

pub async fn run_forecast(args: ForecastArgs, config: &AcenteConfig) -> anyhow::Result<()> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let scope = args.ledger.scope();
    let forecaster = args.ledger.forecaster(config)?;

    info!("Forecasting from {} for {:?}", as_of, scope);

    let result = forecaster.calculate_forecast(&scope, as_of)?;

    if args.ledger.text {
        let history = forecaster.monthly_totals(&scope, as_of)?;
        for aggregate in &history {
            println!("  {}  {:>14}", aggregate.month.format("%Y-%m"), aggregate.total.to_string());
        }
        println!("{}", format_forecast(&result));
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}

pub async fn run_target(args: TargetArgs, config: &AcenteConfig) -> anyhow::Result<()> {
    let period = Period::new(args.month, args.year)?;
    let scope = args.ledger.scope();
    let forecaster = args.ledger.forecaster(config)?;

    let progress = forecaster.target_progress(period, &scope)?;

    if args.ledger.text {
        println!("{}", format_progress(period, &progress));
    } else {
        println!("{}", serde_json::to_string(&progress)?);
    }

    Ok(())
}

fn format_forecast(result: &ForecastResult) -> String {
    format!(
        "{} Forecast: {} TL ({:+}% growth, {} confidence)",
        style("ℹ").blue(),
        result.forecasted_amount,
        result.growth_rate,
        result.confidence
    )
}

fn format_progress(period: Period, progress: &TargetProgress) -> String {
    let pct = if progress.percentage >= 100 {
        style(format!("{}%", progress.percentage)).green()
    } else {
        style(format!("{}%", progress.percentage)).yellow()
    };
    format!(
        "{}: {} / {} TL ({})",
        period, progress.achieved, progress.target, pct
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use acente_core::Confidence;
    use rust_decimal::Decimal;

    #[test]
    fn test_format_forecast() {
        let text = format_forecast(&ForecastResult {
            forecasted_amount: Decimal::new(110000, 2),
            confidence: Confidence::High,
            growth_rate: 10,
        });
        assert!(text.contains("1100.00 TL"));
        assert!(text.contains("+10% growth"));
        assert!(text.contains("HIGH confidence"));
    }

    #[test]
    fn test_format_progress() {
        let text = format_progress(
            Period::new(3, 2024).unwrap(),
            &TargetProgress {
                target: Decimal::from(50000),
                achieved: Decimal::from(37500),
                percentage: 75,
            },
        );
        assert!(text.starts_with("03/2024: 37500 / 50000 TL"));
        assert!(text.contains("75%"));
    }
}
