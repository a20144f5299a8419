//! Recommendation & Alert Synthesizer
//!
//! A fixed, ordered rule set over the analyzer outputs. Rules never look at
//! the ledger directly; everything they need is in the patterns, budget
//! insights and summary.

use crate::config::InsightsConfig;
use crate::money::format_cents;

use super::types::{
    AlertKind, AlertPriority, BudgetInsight, BudgetStatus, FinancialSummary, InsightAlert,
    SpendingPattern, Trend,
};

/// Turns analyzer output into recommendations and alerts
pub struct RecommendationSynthesizer {
    savings_low_pct: f64,
    savings_high_pct: f64,
    savings_alert_low_pct: f64,
    savings_success_pct: f64,
    monitor_trend_pct: f64,
    dominant_share_pct: f64,
    emergency_fund_months: i64,
}

impl RecommendationSynthesizer {
    pub fn new() -> Self {
        Self::from_config(&InsightsConfig::default())
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self {
            savings_low_pct: config.savings_low_pct,
            savings_high_pct: config.savings_high_pct,
            savings_alert_low_pct: config.savings_alert_low_pct,
            savings_success_pct: config.savings_success_pct,
            monitor_trend_pct: config.monitor_trend_pct,
            dominant_share_pct: config.dominant_share_pct,
            emergency_fund_months: config.emergency_fund_months,
        }
    }

    /// Ordered recommendation strings
    pub fn recommendations(
        &self,
        patterns: &[SpendingPattern],
        budgets: &[BudgetInsight],
        summary: &FinancialSummary,
    ) -> Vec<String> {
        let mut out = Vec::new();
        let rate = summary.savings_rate;

        if summary.has_activity() {
            if rate < self.savings_low_pct {
                out.push(format!(
                    "Your savings rate is {:.1}%. Try to save at least {:.0}% of your income by trimming discretionary spending.",
                    rate, self.savings_low_pct
                ));
            } else if rate > self.savings_high_pct {
                out.push(format!(
                    "Excellent! You're saving {:.1}% of your income. Consider putting the surplus toward long-term goals.",
                    rate
                ));
            }
        }

        let exceeded = budgets
            .iter()
            .filter(|b| b.status == BudgetStatus::Exceeded)
            .count();
        if exceeded > 0 {
            out.push(format!(
                "You've exceeded {} {} this month. Review those categories and adjust your spending or limits.",
                exceeded,
                if exceeded == 1 { "budget" } else { "budgets" }
            ));
        }

        // Patterns arrive sorted by average, so the first match is the largest.
        // Growth is measured against the first month, not the window average.
        if let Some(rising) = patterns.iter().find(|p| {
            p.trend == Trend::Increasing && p.baseline_change_percentage > self.monitor_trend_pct
        }) {
            out.push(format!(
                "Keep an eye on {}: spending has risen {:.1}% over recent months.",
                rising.category, rising.baseline_change_percentage
            ));
        }

        if let Some(top) = summary.top_spending_categories.first() {
            if top.percentage > self.dominant_share_pct {
                out.push(format!(
                    "{} makes up {:.1}% of this month's spending. Look for ways to optimize it.",
                    top.category, top.percentage
                ));
            }
        }

        if summary.monthly_expenses > 0 {
            let target = summary
                .monthly_expenses
                .saturating_mul(self.emergency_fund_months);
            out.push(format!(
                "Build an emergency fund of {} ({} months of expenses).",
                format_cents(target),
                self.emergency_fund_months
            ));
        }

        out
    }

    /// Ordered alerts
    pub fn alerts(
        &self,
        budgets: &[BudgetInsight],
        summary: &FinancialSummary,
    ) -> Vec<InsightAlert> {
        let mut alerts = Vec::new();

        for budget in budgets {
            match budget.status {
                BudgetStatus::Exceeded => alerts.push(InsightAlert::new(
                    AlertKind::Warning,
                    AlertPriority::High,
                    format!(
                        "{} budget exceeded: {:.1}% used",
                        budget.category, budget.utilization_percentage
                    ),
                )),
                BudgetStatus::Warning => alerts.push(InsightAlert::new(
                    AlertKind::Warning,
                    AlertPriority::Medium,
                    format!(
                        "{} budget is at {:.1}% of its limit",
                        budget.category, budget.utilization_percentage
                    ),
                )),
                BudgetStatus::OnTrack => {}
            }
        }

        let rate = summary.savings_rate;
        if summary.has_activity() {
            if rate < 0.0 {
                alerts.push(InsightAlert::new(
                    AlertKind::Warning,
                    AlertPriority::High,
                    format!(
                        "You spent more than you earned this month ({} over)",
                        format_cents(summary.monthly_expenses - summary.monthly_income)
                    ),
                ));
            } else if rate < self.savings_alert_low_pct {
                alerts.push(InsightAlert::new(
                    AlertKind::Warning,
                    AlertPriority::Medium,
                    format!("Your savings rate is only {:.1}% this month", rate),
                ));
            }
        }

        let unusual = summary.unusual_transactions.len();
        if unusual > 0 {
            alerts.push(InsightAlert::new(
                AlertKind::Info,
                AlertPriority::Low,
                format!(
                    "{} unusual {} detected this month",
                    unusual,
                    if unusual == 1 { "transaction" } else { "transactions" }
                ),
            ));
        }

        if summary.has_activity() && rate > self.savings_success_pct {
            alerts.push(InsightAlert::new(
                AlertKind::Success,
                AlertPriority::Low,
                format!("Great job! You saved {:.1}% of your income this month", rate),
            ));
        }

        alerts
    }
}

impl Default for RecommendationSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
