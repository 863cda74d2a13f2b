//! CRM sales pipeline records and scoping keys.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Stage of a sale in the agency pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    /// Prospect, no offer yet.
    Lead,
    /// Offer sent to the customer.
    Offer,
    /// Policy issued and in force.
    Active,
    /// Offer declined.
    Lost,
    /// Policy cancelled after issue.
    Cancelled,
}

impl SaleStatus {
    /// Parse a status label (case-insensitive).
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEAD" => Some(SaleStatus::Lead),
            "OFFER" => Some(SaleStatus::Offer),
            "ACTIVE" => Some(SaleStatus::Active),
            "LOST" => Some(SaleStatus::Lost),
            "CANCELLED" | "CANCELED" => Some(SaleStatus::Cancelled),
            _ => None,
        }
    }
}

/// A policy tracked through the sales pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,

    /// Premium amount.
    pub amount: Decimal,

    pub status: SaleStatus,

    /// Date the sale was recorded.
    pub sale_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Revenue goal for a month, optionally per branch and/or salesperson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTarget {
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Optional branch/user restriction applied to ledger queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Scope {
    /// Unrestricted scope.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Whether a record carrying these keys falls inside the scope.
    pub fn matches(&self, branch_id: Option<&str>, user_id: Option<&str>) -> bool {
        let branch_ok = match &self.branch_id {
            Some(wanted) => branch_id == Some(wanted.as_str()),
            None => true,
        };
        let user_ok = match &self.user_id {
            Some(wanted) => user_id == Some(wanted.as_str()),
            None => true,
        };
        branch_ok && user_ok
    }
}

/// A calendar month.
///
/// Both bounds are resolved on construction, so a period near the end of
/// chrono's date range is rejected instead of overflowing later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Create a period from a 1-based month and a year.
    pub fn new(month: u32, year: i32) -> Result<Self, LedgerError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(Self::starting_at)
            .ok_or(LedgerError::InvalidPeriod { month, year })
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Result<Self, LedgerError> {
        date.with_day(1)
            .and_then(Self::starting_at)
            .ok_or(LedgerError::InvalidPeriod {
                month: date.month(),
                year: date.year(),
            })
    }

    fn starting_at(start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { start, end })
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end
    }

    /// The period `months` calendar months earlier.
    pub fn months_back(&self, months: u32) -> Result<Self, LedgerError> {
        self.start
            .checked_sub_months(Months::new(months))
            .and_then(Self::starting_at)
            .ok_or(LedgerError::InvalidPeriod {
                month: self.month(),
                year: self.year(),
            })
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month(), self.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_bounds() {
        let feb = Period::new(2, 2024).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));

        let dec = Period::containing(date(2023, 12, 17)).unwrap();
        assert_eq!(dec.first_day(), date(2023, 12, 1));
        assert_eq!(dec.last_day(), date(2023, 12, 31));
    }

    #[test]
    fn test_period_months_back_crosses_year() {
        let march = Period::new(3, 2024).unwrap();
        let back = march.months_back(6).unwrap();
        assert_eq!((back.month(), back.year()), (9, 2023));
        assert_eq!(back.to_string(), "09/2023");
    }

    #[test]
    fn test_invalid_period() {
        assert!(matches!(
            Period::new(13, 2024),
            Err(LedgerError::InvalidPeriod { month: 13, year: 2024 })
        ));
    }

    #[test]
    fn test_period_at_calendar_limits() {
        assert!(matches!(
            Period::new(12, NaiveDate::MAX.year()),
            Err(LedgerError::InvalidPeriod { month: 12, .. })
        ));
        assert!(Period::containing(NaiveDate::MAX).is_err());
        assert!(Period::new(11, NaiveDate::MAX.year()).is_ok());

        let earliest = Period::containing(NaiveDate::MIN).unwrap();
        assert!(earliest.months_back(1).is_err());
    }

    #[test]
    fn test_scope_matching() {
        let scope = Scope::all().with_branch("ist");
        assert!(scope.matches(Some("ist"), Some("u1")));
        assert!(!scope.matches(Some("ank"), Some("u1")));
        assert!(!scope.matches(None, None));
        assert!(Scope::all().matches(None, Some("u2")));

        let both = Scope::all().with_branch("ist").with_user("u1");
        assert!(both.matches(Some("ist"), Some("u1")));
        assert!(!both.matches(Some("ist"), Some("u2")));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SaleStatus::from_label("active"), Some(SaleStatus::Active));
        assert_eq!(SaleStatus::from_label("Canceled"), Some(SaleStatus::Cancelled));
        assert_eq!(SaleStatus::from_label("pending"), None);
    }
}
