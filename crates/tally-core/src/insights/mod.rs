//! Insight Engine - Financial Insights Analytics
//!
//! Turns a trailing window of the ledger into derived financial intelligence.
//! Insights are never persisted; every run recomputes them from the ledger.
//!
//! ## Pipeline
//!
//! - **Loader** - one snapshot of transactions and current budgets
//! - **Spending Patterns** - per-category monthly trends
//! - **Budget Performance** - utilization and status per budget
//! - **Financial Summary** - current-month totals, top categories, unusual expenses
//! - **Recommendations** - ordered rules and alerts over the above
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate_insights(&db, user_id).await?;
//! ```

pub mod budget_performance;
pub mod engine;
pub mod financial_summary;
pub mod loader;
pub mod math;
pub mod recommendations;
pub mod spending_patterns;
pub mod types;

pub use budget_performance::{BudgetPerformanceAnalyzer, ALL_CATEGORIES};
pub use engine::InsightEngine;
pub use financial_summary::FinancialSummaryGenerator;
pub use loader::{LedgerLoader, LedgerSnapshot};
pub use recommendations::RecommendationSynthesizer;
pub use spending_patterns::SpendingPatternAnalyzer;
pub use types::{
    AIInsights, AlertKind, AlertPriority, BudgetInsight, BudgetStatus, CategorySpending,
    FinancialSummary, InsightAlert, SpendingPattern, Trend, UnusualTransaction,
};
