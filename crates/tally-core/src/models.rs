//! Domain models for Tally

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of the user owning a ledger
pub type UserId = i64;

/// Label used for transactions that have no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined category used for labeling and grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: TransactionKind,
}

/// A ledger transaction. Amounts are non-negative cents; `kind` carries the sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: i64,
    pub kind: TransactionKind,
    pub occurred_on: NaiveDate,
    pub category_id: Option<i64>,
    pub description: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// New transaction for insertion into the store
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub occurred_on: NaiveDate,
    pub description: String,
    pub amount: i64,
    pub kind: TransactionKind,
    pub category_id: Option<i64>,
    /// Deduplication key for imported rows
    pub import_hash: Option<String>,
}

/// A transaction joined with its category, as produced by the ledger loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub transaction: Transaction,
    pub category: Option<Category>,
}

impl LedgerEntry {
    /// Category name, or `Uncategorized` when the transaction has none
    pub fn category_label(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// A spending limit for one category (or all categories) in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    /// `None` means the budget covers every expense category
    pub category_id: Option<i64>,
    /// Category name joined by the loader
    pub category_name: Option<String>,
    pub amount: i64,
    pub period: Period,
}

/// A calendar month, displayed and parsed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    /// Always the first day of the month
    start: NaiveDate,
}

impl Period {
    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            start: date - Duration::days(i64::from(date.day0())),
        }
    }

    /// Build a period from a year and 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|start| Self { start })
            .ok_or_else(|| Error::InvalidData(format!("Invalid period: {}-{}", year, month)))
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    /// The following month
    pub fn next(&self) -> Option<Self> {
        self.start
            .checked_add_months(Months::new(1))
            .map(|start| Self { start })
    }

    /// The month `n` months earlier
    pub fn minus_months(&self, n: u32) -> Option<Self> {
        self.start
            .checked_sub_months(Months::new(n))
            .map(|start| Self { start })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidData(format!("Invalid period (use YYYY-MM): {}", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Period {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
