//! Core types for the insights engine
//!
//! These structures are derived on every run and never persisted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a category's monthly spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monthly spending profile of one category over the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPattern {
    pub category: String,
    /// Mean of the populated monthly totals, in cents
    pub average_monthly: i64,
    pub trend: Trend,
    /// |slope| as a percentage of the average
    pub trend_percentage: f64,
    /// |slope| as a percentage of the first populated month's total
    pub baseline_change_percentage: f64,
    pub insights: Vec<String>,
}

/// How a budget is tracking against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "on_track",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Utilization of one budget in the current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInsight {
    pub category: String,
    pub budget_amount: i64,
    pub spent_amount: i64,
    /// Unbounded above 100
    pub utilization_percentage: f64,
    pub status: BudgetStatus,
    pub recommendation: String,
}

/// One entry of the top spending categories list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: i64,
    /// Share of the month's expenses
    pub percentage: f64,
}

/// A current-month expense far above its category's average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnusualTransaction {
    pub description: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub reason: String,
}

/// Current-month totals and derived lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    /// Can be negative; 0 when there is no income
    pub savings_rate: f64,
    pub top_spending_categories: Vec<CategorySpending>,
    pub unusual_transactions: Vec<UnusualTransaction>,
}

impl FinancialSummary {
    /// Whether the month had any income or expense at all
    pub fn has_activity(&self) -> bool {
        self.monthly_income > 0 || self.monthly_expenses > 0
    }
}

/// Visual kind of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Info,
    Success,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
            AlertKind::Success => "success",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

impl AlertPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertPriority::High => "high",
            AlertPriority::Medium => "medium",
            AlertPriority::Low => "low",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A short notice surfaced alongside recommendations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightAlert {
    pub kind: AlertKind,
    pub message: String,
    pub priority: AlertPriority,
}

impl InsightAlert {
    pub fn new(kind: AlertKind, priority: AlertPriority, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            priority,
        }
    }
}

/// Everything the engine derives for one user in one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AIInsights {
    pub spending_patterns: Vec<SpendingPattern>,
    pub budget_insights: Vec<BudgetInsight>,
    pub financial_summary: FinancialSummary,
    pub recommendations: Vec<String>,
    pub alerts: Vec<InsightAlert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&BudgetStatus::OnTrack).unwrap(),
            "\"on_track\""
        );
        assert_eq!(serde_json::to_string(&Trend::Increasing).unwrap(), "\"increasing\"");
        assert_eq!(serde_json::to_string(&AlertKind::Success).unwrap(), "\"success\"");
        assert_eq!(serde_json::to_string(&AlertPriority::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_empty_insights_serialize() {
        let json = serde_json::to_value(AIInsights::default()).unwrap();
        assert_eq!(json["financial_summary"]["savings_rate"], 0.0);
        assert!(json["alerts"].as_array().unwrap().is_empty());
    }
}
