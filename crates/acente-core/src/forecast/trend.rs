//! Naive linear-trend forecast over monthly ACTIVE sales.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use super::{Result, SalesLedger, SalesQuery};
use crate::models::config::ForecastConfig;
use crate::models::forecast::{Confidence, ForecastResult, MonthlyAggregate, TargetProgress};
use crate::models::sales::{Period, Scope};

/// Computes forecasts and target progress from a ledger.
pub struct TrendForecaster<L> {
    ledger: L,
    config: ForecastConfig,
}

impl<L: SalesLedger> TrendForecaster<L> {
    /// Create a forecaster with the default six-month window.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            config: ForecastConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ForecastConfig) -> Self {
        self.config = config;
        self
    }

    /// ACTIVE sales totals for the month of `as_of` and the configured
    /// number of preceding months, oldest first.
    pub fn monthly_totals(&self, scope: &Scope, as_of: NaiveDate) -> Result<Vec<MonthlyAggregate>> {
        let current = Period::containing(as_of)?;

        (0..=self.config.history_months)
            .rev()
            .map(|back| -> Result<MonthlyAggregate> {
                let period = current.months_back(back)?;
                let total = self.ledger.sum_sales(&SalesQuery::active_in(period, scope))?;
                Ok(MonthlyAggregate {
                    month: period.first_day(),
                    total,
                })
            })
            .collect()
    }

    /// Forecast next month's sales from the trailing monthly totals.
    pub fn calculate_forecast(&self, scope: &Scope, as_of: NaiveDate) -> Result<ForecastResult> {
        let mut aggregates = self.monthly_totals(scope, as_of)?;
        aggregates.sort_by_key(|a| a.month);

        let totals: Vec<Decimal> = aggregates.iter().map(|a| a.total).collect();
        let result = forecast_from_totals(&totals, &self.config);

        info!(
            "Forecast for {:?}: {} ({}, {}% growth)",
            scope, result.forecasted_amount, result.confidence, result.growth_rate
        );

        Ok(result)
    }

    /// Achieved ACTIVE sales against the configured target for a month.
    pub fn target_progress(&self, period: Period, scope: &Scope) -> Result<TargetProgress> {
        let target = self.ledger.sum_targets(period, scope)?;
        let achieved = self.ledger.sum_sales(&SalesQuery::active_in(period, scope))?;

        let percentage = if target.is_zero() {
            0
        } else {
            match achieved
                .checked_div(target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            {
                Some(percentage) => round_to_integer(percentage),
                None if achieved.is_sign_negative() != target.is_sign_negative() => i64::MIN,
                None => i64::MAX,
            }
        };

        debug!("Target progress {}: {}/{} = {}%", period, achieved, target, percentage);

        Ok(TargetProgress {
            target,
            achieved,
            percentage,
        })
    }
}

/// Forecast from chronologically ordered monthly totals.
///
/// Growth ratios are taken only across months whose earlier total is
/// positive. Their mean is clamped to `[-growth_clamp, growth_clamp]` and
/// applied to the latest total.
///
/// A ratio that does not fit in a `Decimal` is saturated rather than
/// dropped; it lands on the clamp either way. Sums and the final product
/// saturate too.
pub fn forecast_from_totals(totals: &[Decimal], config: &ForecastConfig) -> ForecastResult {
    let ratios: Vec<Decimal> = totals
        .windows(2)
        .filter(|pair| pair[0] > Decimal::ZERO)
        .map(|pair| growth_ratio(pair[0], pair[1]))
        .collect();

    let average = if ratios.is_empty() {
        Decimal::ZERO
    } else {
        let sum = ratios
            .iter()
            .fold(Decimal::ZERO, |acc, ratio| acc.saturating_add(*ratio));
        sum / Decimal::from(ratios.len())
    };

    let clamp = config.growth_clamp.abs();
    let growth = average.max(-clamp).min(clamp);

    let latest = totals.last().copied().unwrap_or(Decimal::ZERO);
    let forecasted_amount = latest
        .saturating_mul(Decimal::ONE.saturating_add(growth))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let confidence = if ratios.len() >= config.high_confidence_min_intervals {
        Confidence::High
    } else {
        Confidence::Medium
    };

    ForecastResult {
        forecasted_amount,
        confidence,
        growth_rate: round_to_integer(growth.saturating_mul(Decimal::ONE_HUNDRED)),
    }
}

/// `(current - previous) / previous` for a positive `previous`.
fn growth_ratio(previous: Decimal, current: Decimal) -> Decimal {
    current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .unwrap_or_else(|| {
            debug!("Growth ratio {} -> {} overflowed, saturating", previous, current);
            if current >= previous { Decimal::MAX } else { Decimal::MIN }
        })
}

fn round_to_integer(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
