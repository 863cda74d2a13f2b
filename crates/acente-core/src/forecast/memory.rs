//! In-memory sales ledger, loadable from a JSON ledger file.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Result, SalesLedger, SalesQuery};
use crate::error::LedgerError;
use crate::models::sales::{Period, SaleRecord, SalesTarget, Scope};

/// On-disk ledger layout: `{ "sales": [...], "targets": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default)]
    pub targets: Vec<SalesTarget>,
}

/// Ledger backed by plain vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    sales: Vec<SaleRecord>,
    targets: Vec<SalesTarget>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sales(mut self, sales: impl IntoIterator<Item = SaleRecord>) -> Self {
        self.sales.extend(sales);
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = SalesTarget>) -> Self {
        self.targets.extend(targets);
        self
    }

    /// Parse a ledger from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: LedgerFile =
            serde_json::from_str(json).map_err(|e| LedgerError::Load(e.to_string()))?;
        Ok(Self::from(file))
    }

    /// Load a ledger from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Load(format!("{}: {}", path.display(), e)))?;
        let ledger = Self::from_json(&content)?;
        debug!(
            "Loaded ledger from {} ({} sales, {} targets)",
            path.display(),
            ledger.sales.len(),
            ledger.targets.len()
        );
        Ok(ledger)
    }
}

impl From<LedgerFile> for InMemoryLedger {
    fn from(file: LedgerFile) -> Self {
        Self {
            sales: file.sales,
            targets: file.targets,
        }
    }
}

impl SalesLedger for InMemoryLedger {
    fn sum_sales(&self, query: &SalesQuery) -> Result<Decimal> {
        self.sales
            .iter()
            .filter(|s| s.status == query.status)
            .filter(|s| s.sale_date >= query.from && s.sale_date <= query.to)
            .filter(|s| query.scope.matches(s.branch_id.as_deref(), s.user_id.as_deref()))
            .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.amount))
            .ok_or(LedgerError::Overflow("sales"))
    }

    fn sum_targets(&self, period: Period, scope: &Scope) -> Result<Decimal> {
        self.targets
            .iter()
            .filter(|t| t.month == period.month() && t.year == period.year())
            .filter(|t| scope.matches(t.branch_id.as_deref(), t.user_id.as_deref()))
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
            .ok_or(LedgerError::Overflow("targets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sales::SaleStatus;
    use chrono::NaiveDate;

    const LEDGER_JSON: &str = r#"{
        "sales": [
            {"id": "s1", "amount": "1000", "status": "ACTIVE", "sale_date": "2024-03-01", "branch_id": "ist", "user_id": "u1"},
            {"id": "s2", "amount": 250.5, "status": "ACTIVE", "sale_date": "2024-03-31", "branch_id": "ank"},
            {"id": "s3", "amount": "999", "status": "OFFER", "sale_date": "2024-03-15", "branch_id": "ist"},
            {"id": "s4", "amount": "400", "status": "ACTIVE", "sale_date": "2024-04-01", "branch_id": "ist"}
        ],
        "targets": [
            {"month": 3, "year": 2024, "amount": "2000", "branch_id": "ist"},
            {"month": 3, "year": 2024, "amount": "1000", "branch_id": "ank"}
        ]
    }"#;

    fn march() -> Period {
        Period::new(3, 2024).unwrap()
    }

    #[test]
    fn test_sum_sales_closed_interval_and_status() {
        let ledger = InMemoryLedger::from_json(LEDGER_JSON).unwrap();
        let total = ledger.sum_sales(&SalesQuery::active_in(march(), &Scope::all())).unwrap();
        assert_eq!(total, Decimal::new(12505, 1));
    }

    #[test]
    fn test_sum_sales_scoped() {
        let ledger = InMemoryLedger::from_json(LEDGER_JSON).unwrap();
        let scope = Scope::all().with_branch("ist");
        assert_eq!(
            ledger.sum_sales(&SalesQuery::active_in(march(), &scope)).unwrap(),
            Decimal::from(1000)
        );

        let scope = Scope::all().with_user("u1");
        assert_eq!(
            ledger.sum_sales(&SalesQuery::active_in(march(), &scope)).unwrap(),
            Decimal::from(1000)
        );
    }

    #[test]
    fn test_sum_targets() {
        let ledger = InMemoryLedger::from_json(LEDGER_JSON).unwrap();
        assert_eq!(ledger.sum_targets(march(), &Scope::all()).unwrap(), Decimal::from(3000));
        assert_eq!(
            ledger.sum_targets(march(), &Scope::all().with_branch("ank")).unwrap(),
            Decimal::from(1000)
        );
        assert_eq!(
            ledger.sum_targets(Period::new(4, 2024).unwrap(), &Scope::all()).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_overflowing_sum_is_an_error() {
        let sale = SaleRecord {
            id: "max".to_string(),
            customer_name: None,
            policy_number: None,
            amount: Decimal::MAX,
            status: SaleStatus::Active,
            sale_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            branch_id: None,
            user_id: None,
        };
        let target = SalesTarget {
            month: 3,
            year: 2024,
            amount: Decimal::MAX,
            branch_id: None,
            user_id: None,
        };
        let ledger = InMemoryLedger::new()
            .with_sales(vec![sale.clone(), sale])
            .with_targets(vec![target.clone(), target]);

        assert!(matches!(
            ledger.sum_sales(&SalesQuery::active_in(march(), &Scope::all())),
            Err(LedgerError::Overflow("sales"))
        ));
        assert!(matches!(
            ledger.sum_targets(march(), &Scope::all()),
            Err(LedgerError::Overflow("targets"))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            InMemoryLedger::from_json("{not json"),
            Err(LedgerError::Load(_))
        ));
    }
}
