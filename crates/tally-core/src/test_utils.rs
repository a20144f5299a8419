//! Test utilities for tally-core
//!
//! Fixture builders for ledger snapshots plus in-memory [`LedgerLoader`]
//! implementations, so the insights pipeline can be exercised without SQLite.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::insights::{LedgerLoader, LedgerSnapshot};
use crate::models::{
    Budget, Category, LedgerEntry, Period, Transaction, TransactionKind, UserId,
};

/// Shorthand for a calendar date; panics on an invalid date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {}-{}-{}", year, month, day))
}

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        kind: TransactionKind::Expense,
    }
}

pub fn expense(id: i64, on: NaiveDate, amount: i64, category: Option<Category>) -> LedgerEntry {
    entry(id, on, amount, TransactionKind::Expense, category, "")
}

pub fn income(id: i64, on: NaiveDate, amount: i64, category: Option<Category>) -> LedgerEntry {
    entry(id, on, amount, TransactionKind::Income, category, "")
}

fn entry(
    id: i64,
    on: NaiveDate,
    amount: i64,
    kind: TransactionKind,
    category: Option<Category>,
    description: &str,
) -> LedgerEntry {
    LedgerEntry {
        transaction: Transaction {
            id,
            amount,
            kind,
            occurred_on: on,
            category_id: category.as_ref().map(|c| c.id),
            description: description.to_string(),
        },
        category,
    }
}

/// Builds a [`LedgerSnapshot`] fluently
///
/// Categories are created on first use of a name and reuse the same id
/// afterwards, so budgets and expenses referring to one name line up.
#[derive(Default)]
pub struct SnapshotBuilder {
    entries: Vec<LedgerEntry>,
    budgets: Vec<Budget>,
    categories: BTreeMap<String, Category>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn category_named(&mut self, name: &str) -> Category {
        let next_id = self.categories.len() as i64 + 1;
        self.categories
            .entry(name.to_string())
            .or_insert_with(|| category(next_id, name))
            .clone()
    }

    fn next_id(&self) -> i64 {
        self.entries.len() as i64 + 1
    }

    pub fn expense(self, on: NaiveDate, amount: i64, category_name: &str) -> Self {
        self.expense_described(on, amount, category_name, "")
    }

    pub fn expense_described(
        mut self,
        on: NaiveDate,
        amount: i64,
        category_name: &str,
        description: &str,
    ) -> Self {
        let category = self.category_named(category_name);
        let id = self.next_id();
        self.entries.push(entry(
            id,
            on,
            amount,
            TransactionKind::Expense,
            Some(category),
            description,
        ));
        self
    }

    pub fn uncategorized_expense(mut self, on: NaiveDate, amount: i64) -> Self {
        let id = self.next_id();
        self.entries.push(expense(id, on, amount, None));
        self
    }

    pub fn income(mut self, on: NaiveDate, amount: i64) -> Self {
        let id = self.next_id();
        self.entries.push(income(id, on, amount, None));
        self
    }

    /// Add a budget; `None` covers all categories
    pub fn budget(mut self, category_name: Option<&str>, amount: i64, period: Period) -> Self {
        let category = category_name.map(|name| self.category_named(name));
        let id = self.budgets.len() as i64 + 1;
        self.budgets.push(Budget {
            id,
            name: category
                .as_ref()
                .map(|c| format!("{} budget", c.name))
                .unwrap_or_else(|| "Monthly budget".to_string()),
            category_id: category.as_ref().map(|c| c.id),
            category_name: category.map(|c| c.name),
            amount,
            period,
        });
        self
    }

    /// Entries are sorted chronologically (then by id), as a loader returns them
    pub fn build(self) -> LedgerSnapshot {
        let mut entries = self.entries;
        entries.sort_by_key(|e| (e.transaction.occurred_on, e.transaction.id));
        LedgerSnapshot::new(entries, self.budgets)
    }
}

/// In-memory loader serving a fixed snapshot
///
/// Applies the same window and period filters as the SQLite store and counts
/// how often each method is called.
pub struct MemoryLedger {
    snapshot: LedgerSnapshot,
    window_calls: AtomicUsize,
    budget_calls: AtomicUsize,
}

impl MemoryLedger {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot,
            window_calls: AtomicUsize::new(0),
            budget_calls: AtomicUsize::new(0),
        }
    }

    pub fn window_calls(&self) -> usize {
        self.window_calls.load(Ordering::SeqCst)
    }

    pub fn budget_calls(&self) -> usize {
        self.budget_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerLoader for MemoryLedger {
    async fn load_window(
        &self,
        _user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        self.window_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .snapshot
            .entries
            .iter()
            .filter(|e| e.transaction.occurred_on >= from && e.transaction.occurred_on <= to)
            .cloned()
            .collect())
    }

    async fn load_current_budgets(&self, _user_id: UserId, period: Period) -> Result<Vec<Budget>> {
        self.budget_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .snapshot
            .budgets
            .iter()
            .filter(|b| b.period == period)
            .cloned()
            .collect())
    }
}

/// Loader whose every call fails, for error propagation tests
pub struct FailingLedger;

#[async_trait]
impl LedgerLoader for FailingLedger {
    async fn load_window(
        &self,
        _user_id: UserId,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        Err(Error::NotFound("ledger unavailable".into()))
    }

    async fn load_current_budgets(&self, _user_id: UserId, _period: Period) -> Result<Vec<Budget>> {
        Err(Error::NotFound("ledger unavailable".into()))
    }
}
