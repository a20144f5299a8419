//! Insight Engine - orchestrates one insights run
//!
//! Loads a single ledger snapshot, runs the three analyzers over it, then the
//! rule engine over their output. Everything after the load is synchronous
//! and pure.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::InsightsConfig;
use crate::error::{Error, Result};
use crate::models::{Period, UserId};

use super::budget_performance::BudgetPerformanceAnalyzer;
use super::financial_summary::FinancialSummaryGenerator;
use super::loader::{LedgerLoader, LedgerSnapshot};
use super::recommendations::RecommendationSynthesizer;
use super::spending_patterns::SpendingPatternAnalyzer;
use super::types::AIInsights;

/// The insights pipeline
///
/// Holds only immutable configuration, so one engine can be shared across
/// tasks or built per call.
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightsConfig,
}

impl InsightEngine {
    /// Engine with built-in thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InsightsConfig) -> Self {
        Self { config }
    }

    /// Generate insights for `user_id` as of today (local time)
    pub async fn generate_insights<L>(&self, loader: &L, user_id: UserId) -> Result<AIInsights>
    where
        L: LedgerLoader + ?Sized,
    {
        let today = Local::now().date_naive();
        self.generate_insights_at(loader, user_id, today).await
    }

    /// Generate insights for `user_id` as of `today`
    ///
    /// Any loader failure fails the whole run; no partial result is returned.
    pub async fn generate_insights_at<L>(
        &self,
        loader: &L,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<AIInsights>
    where
        L: LedgerLoader + ?Sized,
    {
        let result = self.load_and_analyze(loader, user_id, today).await;
        if let Err(e) = &result {
            warn!(user_id, error = %e, "Insights generation failed");
        }
        result.map_err(Error::insights_failed)
    }

    async fn load_and_analyze<L>(
        &self,
        loader: &L,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<AIInsights>
    where
        L: LedgerLoader + ?Sized,
    {
        let (from, current) = self.window(today)?;

        let entries = loader.load_window(user_id, from, today).await?;
        let budgets = loader.load_current_budgets(user_id, current).await?;
        debug!(
            user_id,
            from = %from,
            to = %today,
            transactions = entries.len(),
            budgets = budgets.len(),
            "Ledger snapshot loaded"
        );

        let insights = self.analyze_snapshot(&LedgerSnapshot::new(entries, budgets), today);

        info!(
            user_id,
            patterns = insights.spending_patterns.len(),
            budgets = insights.budget_insights.len(),
            recommendations = insights.recommendations.len(),
            alerts = insights.alerts.len(),
            "Insights generated"
        );
        Ok(insights)
    }

    /// First day of the window and the current period for `today`
    ///
    /// The window spans `window_months` calendar months, the current one
    /// included.
    pub fn window(&self, today: NaiveDate) -> Result<(NaiveDate, Period)> {
        let current = Period::from_date(today);
        let back = self.config.window_months.saturating_sub(1);
        let first = current.minus_months(back).ok_or_else(|| {
            Error::InvalidData(format!("Analysis window before {} is out of range", today))
        })?;
        Ok((first.first_day(), current))
    }

    /// Run every analyzer over an already-loaded snapshot
    ///
    /// Pure: identical snapshots and dates always produce identical output.
    pub fn analyze_snapshot(&self, snapshot: &LedgerSnapshot, today: NaiveDate) -> AIInsights {
        let current = Period::from_date(today);

        let spending_patterns =
            SpendingPatternAnalyzer::from_config(&self.config).analyze(snapshot);
        let budget_insights =
            BudgetPerformanceAnalyzer::from_config(&self.config).analyze(snapshot);
        let financial_summary =
            FinancialSummaryGenerator::from_config(&self.config).generate(snapshot, current);

        let synthesizer = RecommendationSynthesizer::from_config(&self.config);
        let recommendations =
            synthesizer.recommendations(&spending_patterns, &budget_insights, &financial_summary);
        let alerts = synthesizer.alerts(&budget_insights, &financial_summary);

        AIInsights {
            spending_patterns,
            budget_insights,
            financial_summary,
            recommendations,
            alerts,
        }
    }
}
