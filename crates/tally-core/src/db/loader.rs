//! SQLite-backed ledger loader for the insights engine

use async_trait::async_trait;
use chrono::NaiveDate;

use super::Database;
use crate::error::Result;
use crate::insights::LedgerLoader;
use crate::models::{Budget, LedgerEntry, Period, UserId};

#[async_trait]
impl LedgerLoader for Database {
    async fn load_window(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        self.list_ledger_entries(user_id, from, to)
    }

    async fn load_current_budgets(&self, user_id: UserId, period: Period) -> Result<Vec<Budget>> {
        self.list_budgets(user_id, Some(period))
    }
}
