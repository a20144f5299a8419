//! Spending Pattern Analyzer
//!
//! Aggregates expenses per category and calendar month, then fits a linear
//! trend through the monthly totals to classify each category as increasing,
//! decreasing or stable.
//!
//! Categories are grouped by *name*: two categories sharing a name are merged
//! into a single pattern.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::InsightsConfig;
use crate::models::Period;
use crate::money::format_cents;

use super::loader::LedgerSnapshot;
use super::math::{mean, ols_slope, safe_divide};
use super::types::{SpendingPattern, Trend};

/// Minimum populated months before a trend is fitted
const MIN_MONTHS: usize = 2;

/// Produces one [`SpendingPattern`] per category with enough history
pub struct SpendingPatternAnalyzer {
    /// Trend percentage below which a category is stable (default 5%)
    stable_below_pct: f64,
    /// Trend percentage above which an insight line is emitted (default 10%)
    insight_above_pct: f64,
    /// Monthly average above which a category is a major expense (default $500)
    major_expense_cents: i64,
}

impl SpendingPatternAnalyzer {
    pub fn new() -> Self {
        Self::from_config(&InsightsConfig::default())
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self {
            stable_below_pct: config.trend_stable_below_pct,
            insight_above_pct: config.trend_insight_above_pct,
            major_expense_cents: config.major_expense_cents,
        }
    }

    /// Analyze the expense history in `snapshot`
    ///
    /// Output is sorted by average monthly spend, highest first.
    pub fn analyze(&self, snapshot: &LedgerSnapshot) -> Vec<SpendingPattern> {
        let mut monthly: BTreeMap<&str, BTreeMap<Period, i64>> = BTreeMap::new();

        for entry in snapshot.expenses() {
            let month = Period::from_date(entry.transaction.occurred_on);
            *monthly
                .entry(entry.category_label())
                .or_default()
                .entry(month)
                .or_insert(0) += entry.transaction.amount;
        }

        let mut patterns: Vec<SpendingPattern> = monthly
            .into_iter()
            .filter(|(_, months)| months.len() >= MIN_MONTHS)
            .map(|(category, months)| {
                let totals: Vec<f64> = months.values().map(|&cents| cents as f64).collect();
                self.pattern_for(category, &totals)
            })
            .collect();

        // Stable sort: equal averages stay in category-name order
        patterns.sort_by(|a, b| b.average_monthly.cmp(&a.average_monthly));

        debug!(categories = patterns.len(), "Spending patterns analyzed");
        patterns
    }

    fn pattern_for(&self, category: &str, monthly_totals: &[f64]) -> SpendingPattern {
        let average = mean(monthly_totals);
        let slope = ols_slope(monthly_totals);
        let trend_percentage = safe_divide(slope.abs() * 100.0, average);
        let first = monthly_totals.first().copied().unwrap_or(0.0);
        let baseline_change_percentage = safe_divide(slope.abs() * 100.0, first);

        let trend = if trend_percentage < self.stable_below_pct {
            Trend::Stable
        } else if slope > 0.0 {
            Trend::Increasing
        } else {
            Trend::Decreasing
        };

        let average_monthly = average.round() as i64;
        let mut insights = Vec::new();

        match trend {
            Trend::Increasing if trend_percentage > self.insight_above_pct => {
                insights.push(format!(
                    "Spending in {} increased by {:.1}% over recent months",
                    category, trend_percentage
                ));
            }
            Trend::Decreasing if trend_percentage > self.insight_above_pct => {
                insights.push(format!(
                    "Great job! Spending in {} decreased by {:.1}% over recent months",
                    category, trend_percentage
                ));
            }
            _ => {}
        }

        if average > self.major_expense_cents as f64 {
            insights.push(format!(
                "{} is a major expense category, averaging {} per month",
                category,
                format_cents(average_monthly)
            ));
        }

        SpendingPattern {
            category: category.to_string(),
            average_monthly,
            trend,
            trend_percentage,
            baseline_change_percentage,
            insights,
        }
    }
}

impl Default for SpendingPatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{category, date, expense, SnapshotBuilder};

    fn two_months(first: i64, second: i64) -> LedgerSnapshot {
        SnapshotBuilder::new()
            .expense(date(2024, 1, 10), first, "Dining")
            .expense(date(2024, 2, 10), second, "Dining")
            .build()
    }

    #[test]
    fn test_five_percent_change_is_stable() {
        let patterns = SpendingPatternAnalyzer::new().analyze(&two_months(100, 105));

        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.trend, Trend::Stable);
        // slope 5 over an average of 102.5
        assert!((p.trend_percentage - 4.878).abs() < 0.001);
        assert!((p.baseline_change_percentage - 5.0).abs() < 1e-9);
        assert!(p.insights.is_empty());
    }

    #[test]
    fn test_sixteen_cent_rise_is_increasing() {
        let patterns = SpendingPatternAnalyzer::new().analyze(&two_months(100, 116));

        let p = &patterns[0];
        assert_eq!(p.trend, Trend::Increasing);
        assert_eq!(p.average_monthly, 108);
        assert!((p.trend_percentage - 14.815).abs() < 0.001);
        // Against the first month the same slope is a 16% rise
        assert!((p.baseline_change_percentage - 16.0).abs() < 1e-9);
        assert_eq!(
            p.insights,
            vec!["Spending in Dining increased by 14.8% over recent months".to_string()]
        );
    }

    #[test]
    fn test_decreasing_trend_is_praised() {
        let snapshot = SnapshotBuilder::new()
            .expense(date(2024, 1, 5), 1000, "Coffee")
            .expense(date(2024, 2, 5), 800, "Coffee")
            .expense(date(2024, 3, 5), 600, "Coffee")
            .build();

        let p = &SpendingPatternAnalyzer::new().analyze(&snapshot)[0];
        assert_eq!(p.trend, Trend::Decreasing);
        assert!((p.trend_percentage - 25.0).abs() < 1e-9);
        assert!(p.insights[0].starts_with("Great job! Spending in Coffee decreased by 25.0%"));
    }

    #[test]
    fn test_single_month_category_dropped() {
        let snapshot = SnapshotBuilder::new()
            .expense(date(2024, 1, 3), 5000, "Travel")
            .expense(date(2024, 1, 20), 7000, "Travel")
            .build();

        assert!(SpendingPatternAnalyzer::new().analyze(&snapshot).is_empty());
    }

    #[test]
    fn test_income_ignored() {
        let snapshot = SnapshotBuilder::new()
            .income(date(2024, 1, 1), 500_000)
            .income(date(2024, 2, 1), 600_000)
            .build();

        assert!(SpendingPatternAnalyzer::new().analyze(&snapshot).is_empty());
    }

    #[test]
    fn test_major_expense_note_follows_trend_note() {
        let snapshot = SnapshotBuilder::new()
            .expense(date(2024, 1, 1), 100_000, "Rent")
            .expense(date(2024, 2, 1), 150_000, "Rent")
            .build();

        let p = &SpendingPatternAnalyzer::new().analyze(&snapshot)[0];
        assert_eq!(p.insights.len(), 2);
        assert!(p.insights[0].contains("increased by"));
        assert_eq!(
            p.insights[1],
            "Rent is a major expense category, averaging $1,250.00 per month"
        );
    }

    #[test]
    fn test_sorted_by_average_descending() {
        let snapshot = SnapshotBuilder::new()
            .expense(date(2024, 1, 1), 1000, "Books")
            .expense(date(2024, 2, 1), 1000, "Books")
            .expense(date(2024, 1, 1), 9000, "Groceries")
            .expense(date(2024, 2, 1), 9000, "Groceries")
            .expense(date(2024, 1, 1), 4000, "Fuel")
            .expense(date(2024, 3, 1), 4000, "Fuel")
            .build();

        let names: Vec<_> = SpendingPatternAnalyzer::new()
            .analyze(&snapshot)
            .into_iter()
            .map(|p| p.category)
            .collect();
        assert_eq!(names, vec!["Groceries", "Fuel", "Books"]);
    }

    #[test]
    fn test_same_name_categories_merge() {
        let first = category(1, "Shopping");
        let second = category(2, "Shopping");
        let snapshot = LedgerSnapshot::new(
            vec![
                expense(1, date(2024, 1, 4), 2000, Some(first)),
                expense(2, date(2024, 2, 4), 2000, Some(second)),
            ],
            vec![],
        );

        let patterns = SpendingPatternAnalyzer::new().analyze(&snapshot);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].category, "Shopping");
        assert_eq!(patterns[0].average_monthly, 2000);
    }

    #[test]
    fn test_uncategorized_grouped() {
        let snapshot = LedgerSnapshot::new(
            vec![
                expense(1, date(2024, 1, 4), 300, None),
                expense(2, date(2024, 2, 4), 300, None),
            ],
            vec![],
        );

        let patterns = SpendingPatternAnalyzer::new().analyze(&snapshot);
        assert_eq!(patterns[0].category, "Uncategorized");
        assert_eq!(patterns[0].trend, Trend::Stable);
    }

    #[test]
    fn test_zero_spend_months_are_stable() {
        let snapshot = two_months(0, 0);
        let p = &SpendingPatternAnalyzer::new().analyze(&snapshot)[0];
        assert_eq!(p.trend, Trend::Stable);
        assert_eq!(p.trend_percentage, 0.0);
        assert_eq!(p.baseline_change_percentage, 0.0);
    }
}
