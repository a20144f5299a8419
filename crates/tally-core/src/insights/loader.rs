//! Ledger snapshot loading
//!
//! The engine reads exactly one snapshot per run through [`LedgerLoader`].
//! Storage is somebody else's job: `Database` implements the trait for the
//! SQLite store, and tests use in-memory loaders.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Budget, LedgerEntry, Period, UserId};

/// Source of ledger data for the insights engine
#[async_trait]
pub trait LedgerLoader: Send + Sync {
    /// Transactions (joined with their category) dated `from..=to`,
    /// in chronological order
    async fn load_window(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>>;

    /// Budgets defined for `period`
    async fn load_current_budgets(&self, user_id: UserId, period: Period) -> Result<Vec<Budget>>;
}

/// The data one insights run is computed from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub entries: Vec<LedgerEntry>,
    pub budgets: Vec<Budget>,
}

impl LedgerSnapshot {
    pub fn new(entries: Vec<LedgerEntry>, budgets: Vec<Budget>) -> Self {
        Self { entries, budgets }
    }

    /// Expense entries in snapshot order
    pub fn expenses(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|e| e.transaction.is_expense())
    }

    /// Entries dated within `period`, in snapshot order
    pub fn in_period(&self, period: Period) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .iter()
            .filter(move |e| period.contains(e.transaction.occurred_on))
    }
}
