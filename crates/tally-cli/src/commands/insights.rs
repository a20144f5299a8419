//! Insights command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{
    db::Database,
    insights::{AIInsights, AlertKind, BudgetStatus, InsightEngine, Trend},
    money::format_cents,
    InsightsConfig, UserId,
};

use super::{parse_date_arg, truncate};

/// Load insights thresholds; an explicit path must exist
pub fn load_config(path: Option<&Path>) -> Result<InsightsConfig> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    InsightsConfig::load(path).context("Failed to load insights config")
}

pub async fn cmd_insights(
    db: &Database,
    user: UserId,
    config_path: Option<&Path>,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let engine = InsightEngine::with_config(load_config(config_path)?);

    let insights = match as_of {
        Some(date) => {
            let today = parse_date_arg(date)?;
            engine.generate_insights_at(db, user, today).await?
        }
        None => engine.generate_insights(db, user).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print!("{}", render_insights(&insights));
    }

    Ok(())
}

/// Human-readable report
pub fn render_insights(insights: &AIInsights) -> String {
    let mut lines: Vec<String> = Vec::new();
    let summary = &insights.financial_summary;

    lines.push(String::new());
    lines.push("📊 This Month".to_string());
    lines.push("   ─────────────────────────────────────────────".to_string());
    lines.push(format!("   Income:       {:>14}", format_cents(summary.monthly_income)));
    lines.push(format!("   Expenses:     {:>14}", format_cents(summary.monthly_expenses)));
    lines.push(format!("   Savings rate: {:>13.1}%", summary.savings_rate));

    if !summary.top_spending_categories.is_empty() {
        lines.push(String::new());
        lines.push("   Top categories:".to_string());
        for cat in &summary.top_spending_categories {
            lines.push(format!(
                "     {:<24} {:>12} {:>6.1}%",
                truncate(&cat.category, 24),
                format_cents(cat.amount),
                cat.percentage
            ));
        }
    }

    if !summary.unusual_transactions.is_empty() {
        lines.push(String::new());
        lines.push("   Unusual transactions:".to_string());
        for tx in &summary.unusual_transactions {
            lines.push(format!(
                "     {} {:<24} {:>12}  {}",
                tx.date,
                truncate(&tx.description, 24),
                format_cents(tx.amount),
                tx.reason
            ));
        }
    }

    if !insights.spending_patterns.is_empty() {
        lines.push(String::new());
        lines.push("📈 Spending Trends".to_string());
        lines.push("   ─────────────────────────────────────────────".to_string());
        for pattern in &insights.spending_patterns {
            let arrow = match pattern.trend {
                Trend::Increasing => "↑",
                Trend::Decreasing => "↓",
                Trend::Stable => "→",
            };
            lines.push(format!(
                "   {} {:<24} avg {:>12}/mo  {} {:.1}%",
                arrow,
                truncate(&pattern.category, 24),
                format_cents(pattern.average_monthly),
                pattern.trend,
                pattern.trend_percentage
            ));
            for note in &pattern.insights {
                lines.push(format!("       {}", note));
            }
        }
    }

    if !insights.budget_insights.is_empty() {
        lines.push(String::new());
        lines.push("💰 Budgets".to_string());
        lines.push("   ─────────────────────────────────────────────".to_string());
        for budget in &insights.budget_insights {
            let icon = match budget.status {
                BudgetStatus::OnTrack => "✅",
                BudgetStatus::Warning => "⚠️ ",
                BudgetStatus::Exceeded => "🔴",
            };
            lines.push(format!(
                "   {} {:<24} {:>12} of {:>12} ({:.1}%)",
                icon,
                truncate(&budget.category, 24),
                format_cents(budget.spent_amount),
                format_cents(budget.budget_amount),
                budget.utilization_percentage
            ));
        }
    }

    if !insights.alerts.is_empty() {
        lines.push(String::new());
        lines.push("🔔 Alerts".to_string());
        lines.push("   ─────────────────────────────────────────────".to_string());
        for alert in &insights.alerts {
            let icon = match alert.kind {
                AlertKind::Warning => "⚠️ ",
                AlertKind::Info => "ℹ️ ",
                AlertKind::Success => "🎉",
            };
            lines.push(format!("   {} [{}] {}", icon, alert.priority, alert.message));
        }
    }

    if !insights.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("💡 Recommendations".to_string());
        lines.push("   ─────────────────────────────────────────────".to_string());
        for (i, rec) in insights.recommendations.iter().enumerate() {
            lines.push(format!("   {}. {}", i + 1, rec));
        }
    }

    if insights.spending_patterns.is_empty()
        && insights.budget_insights.is_empty()
        && !summary.has_activity()
    {
        lines.push(String::new());
        lines.push("No activity in the last six months. Import some with:".to_string());
        lines.push("  tally import --file ledger.csv".to_string());
    }

    lines.push(String::new());
    lines.join("\n")
}
