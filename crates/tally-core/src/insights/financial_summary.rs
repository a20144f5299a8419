//! Financial Summary Generator
//!
//! Current-month income, expenses and savings rate, the month's top spending
//! categories, and expenses that stand out against their category's average
//! over the whole window.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::InsightsConfig;
use crate::models::Period;

use super::loader::LedgerSnapshot;
use super::math::{safe_divide, safe_percent};
use super::types::{CategorySpending, FinancialSummary, UnusualTransaction};

/// Builds the [`FinancialSummary`] for one period
pub struct FinancialSummaryGenerator {
    /// Max entries in the top categories list (default 5)
    top_categories_limit: usize,
    /// Multiple of the category average that makes an expense unusual (default 3x)
    unusual_multiple: f64,
    /// Absolute amount an unusual expense must exceed (default $100)
    unusual_floor_cents: i64,
    /// Max entries in the unusual transactions list (default 5)
    unusual_limit: usize,
}

impl FinancialSummaryGenerator {
    pub fn new() -> Self {
        Self::from_config(&InsightsConfig::default())
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self {
            top_categories_limit: config.top_categories_limit,
            unusual_multiple: config.unusual_multiple,
            unusual_floor_cents: config.unusual_floor_cents,
            unusual_limit: config.unusual_limit,
        }
    }

    /// Summarize `current` using the full snapshot as history
    pub fn generate(&self, snapshot: &LedgerSnapshot, current: Period) -> FinancialSummary {
        let mut monthly_income = 0;
        let mut monthly_expenses = 0;
        for entry in snapshot.in_period(current) {
            if entry.transaction.is_income() {
                monthly_income += entry.transaction.amount;
            } else {
                monthly_expenses += entry.transaction.amount;
            }
        }

        // safe_percent yields 0 when there is no income
        let savings_rate = safe_percent(monthly_income - monthly_expenses, monthly_income);

        let top_spending_categories = self.top_categories(snapshot, current, monthly_expenses);
        let unusual_transactions = self.unusual_transactions(snapshot, current);

        debug!(
            period = %current,
            income = monthly_income,
            expenses = monthly_expenses,
            unusual = unusual_transactions.len(),
            "Financial summary generated"
        );

        FinancialSummary {
            monthly_income,
            monthly_expenses,
            savings_rate,
            top_spending_categories,
            unusual_transactions,
        }
    }

    fn top_categories(
        &self,
        snapshot: &LedgerSnapshot,
        current: Period,
        total_expenses: i64,
    ) -> Vec<CategorySpending> {
        let mut by_category: BTreeMap<&str, i64> = BTreeMap::new();
        for entry in snapshot
            .in_period(current)
            .filter(|e| e.transaction.is_expense())
        {
            *by_category.entry(entry.category_label()).or_insert(0) += entry.transaction.amount;
        }

        let mut ranked: Vec<(&str, i64)> = by_category.into_iter().collect();
        // Stable sort: ties keep category-name order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(self.top_categories_limit)
            .map(|(category, amount)| CategorySpending {
                category: category.to_string(),
                amount,
                percentage: safe_percent(amount, total_expenses),
            })
            .collect()
    }

    fn unusual_transactions(
        &self,
        snapshot: &LedgerSnapshot,
        current: Period,
    ) -> Vec<UnusualTransaction> {
        // Mean single-expense amount per category over the whole window
        let mut totals: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for entry in snapshot.expenses() {
            let slot = totals.entry(entry.category_label()).or_insert((0, 0));
            slot.0 += entry.transaction.amount;
            slot.1 += 1;
        }
        let averages: BTreeMap<&str, f64> = totals
            .into_iter()
            .map(|(category, (sum, count))| (category, safe_divide(sum as f64, count as f64)))
            .collect();

        let mut unusual = Vec::new();
        for entry in snapshot
            .in_period(current)
            .filter(|e| e.transaction.is_expense())
        {
            if unusual.len() >= self.unusual_limit {
                break;
            }

            let tx = &entry.transaction;
            let category = entry.category_label();
            let average = averages.get(category).copied().unwrap_or(0.0);
            let amount = tx.amount as f64;

            if amount > self.unusual_multiple * average && tx.amount > self.unusual_floor_cents {
                let multiple = safe_divide(amount, average).round() as i64;
                let description = if tx.description.trim().is_empty() {
                    category.to_string()
                } else {
                    tx.description.clone()
                };

                unusual.push(UnusualTransaction {
                    description,
                    amount: tx.amount,
                    date: tx.occurred_on,
                    reason: format!(
                        "{}× higher than your average {} spending",
                        multiple, category
                    ),
                });
            }
        }

        unusual
    }
}

impl Default for FinancialSummaryGenerator {
    fn default() -> Self {
        Self::new()
    }
}
