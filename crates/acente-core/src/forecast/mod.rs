//! Sales trend forecasting and target progress.
//!
//! The forecaster reads aggregates through a [`SalesLedger`], so it holds no
//! process-wide state and can be driven by [`InMemoryLedger`] in tests.

mod memory;
mod trend;

pub use memory::{InMemoryLedger, LedgerFile};
pub use trend::TrendForecaster;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::sales::{Period, SaleStatus, Scope};

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// A sum query over the sales ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesQuery {
    /// First day included.
    pub from: NaiveDate,
    /// Last day included.
    pub to: NaiveDate,
    /// Only records in this status are summed.
    pub status: SaleStatus,
    /// Branch/user restriction.
    pub scope: Scope,
}

impl SalesQuery {
    /// ACTIVE sales within a calendar month.
    pub fn active_in(period: Period, scope: &Scope) -> Self {
        Self {
            from: period.first_day(),
            to: period.last_day(),
            status: SaleStatus::Active,
            scope: scope.clone(),
        }
    }
}

/// Data source for sales and target aggregates.
pub trait SalesLedger {
    /// Sum of sale amounts matching the query.
    fn sum_sales(&self, query: &SalesQuery) -> Result<Decimal>;

    /// Sum of configured target amounts for a month. No target sums to zero.
    fn sum_targets(&self, period: Period, scope: &Scope) -> Result<Decimal>;
}

impl<L: SalesLedger + ?Sized> SalesLedger for &L {
    fn sum_sales(&self, query: &SalesQuery) -> Result<Decimal> {
        (**self).sum_sales(query)
    }

    fn sum_targets(&self, period: Period, scope: &Scope) -> Result<Decimal> {
        (**self).sum_targets(period, scope)
    }
}
