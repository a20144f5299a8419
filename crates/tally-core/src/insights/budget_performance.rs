//! Budget Performance Analyzer
//!
//! Measures how much of each current-period budget has been spent and
//! classifies it as on track, warning or exceeded.

use tracing::debug;

use crate::config::InsightsConfig;
use crate::models::{Budget, LedgerEntry};

use super::loader::LedgerSnapshot;
use super::math::safe_percent;
use super::types::{BudgetInsight, BudgetStatus};

/// Label for budgets that cover every category
pub const ALL_CATEGORIES: &str = "All categories";

/// Produces one [`BudgetInsight`] per budget, in budget order
pub struct BudgetPerformanceAnalyzer {
    /// Utilization above which a budget is in warning (default 75%)
    warning_above_pct: f64,
    /// Utilization above which a budget is exceeded (default 100%)
    exceeded_above_pct: f64,
}

impl BudgetPerformanceAnalyzer {
    pub fn new() -> Self {
        Self::from_config(&InsightsConfig::default())
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self {
            warning_above_pct: config.budget_warning_above_pct,
            exceeded_above_pct: config.budget_exceeded_above_pct,
        }
    }

    pub fn analyze(&self, snapshot: &LedgerSnapshot) -> Vec<BudgetInsight> {
        let insights: Vec<BudgetInsight> = snapshot
            .budgets
            .iter()
            .map(|budget| {
                let spent = snapshot
                    .expenses()
                    .filter(|entry| counts_toward(budget, entry))
                    .map(|entry| entry.transaction.amount)
                    .sum();
                self.insight_for(budget, spent)
            })
            .collect();

        debug!(budgets = insights.len(), "Budget performance analyzed");
        insights
    }

    /// Classify a utilization percentage
    pub fn classify(&self, utilization: f64) -> BudgetStatus {
        if utilization > self.exceeded_above_pct {
            BudgetStatus::Exceeded
        } else if utilization > self.warning_above_pct {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OnTrack
        }
    }

    fn insight_for(&self, budget: &Budget, spent: i64) -> BudgetInsight {
        // A zero budget has no meaningful utilization; report 0% / on track
        let utilization = safe_percent(spent, budget.amount);
        let status = self.classify(utilization);
        let category = budget_label(budget);

        let recommendation = match status {
            BudgetStatus::OnTrack => format!(
                "On track: {:.1}% of your {} budget used so far.",
                utilization, category
            ),
            BudgetStatus::Warning => format!(
                "You've used {:.1}% of your {} budget. Slow down to stay within your limit.",
                utilization, category
            ),
            BudgetStatus::Exceeded => format!(
                "You've exceeded your {} budget ({:.1}% used). Review this category and adjust your spending or budget.",
                category, utilization
            ),
        };

        BudgetInsight {
            category,
            budget_amount: budget.amount,
            spent_amount: spent,
            utilization_percentage: utilization,
            status,
            recommendation,
        }
    }
}

impl Default for BudgetPerformanceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an expense entry is charged against `budget`
fn counts_toward(budget: &Budget, entry: &LedgerEntry) -> bool {
    let tx = &entry.transaction;
    if !budget.period.contains(tx.occurred_on) {
        return false;
    }
    match budget.category_id {
        None => true,
        Some(id) => tx.category_id == Some(id),
    }
}

fn budget_label(budget: &Budget) -> String {
    match (budget.category_id, &budget.category_name) {
        (None, _) => ALL_CATEGORIES.to_string(),
        (Some(_), Some(name)) => name.clone(),
        (Some(_), None) => budget.name.clone(),
    }
}
