//! Insights engine configuration
//!
//! Every threshold the analyzers and the rule engine use lives here.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override file (explicit path, or
//!    ~/.local/share/tally/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their built-in values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Thresholds for the insights pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsConfig {
    /// Trailing calendar months in the analysis window (current month included)
    pub window_months: u32,

    // Spending patterns
    /// Trend percentage below which a category is stable
    pub trend_stable_below_pct: f64,
    /// Trend percentage above which an insight line is emitted
    pub trend_insight_above_pct: f64,
    /// Monthly average (cents) above which a category is a major expense
    pub major_expense_cents: i64,

    // Budgets
    /// Utilization above which a budget is in warning
    pub budget_warning_above_pct: f64,
    /// Utilization above which a budget is exceeded
    pub budget_exceeded_above_pct: f64,

    // Summary
    pub top_categories_limit: usize,
    /// Multiple of the category average that makes a transaction unusual
    pub unusual_multiple: f64,
    /// Absolute floor (cents) an unusual transaction must exceed
    pub unusual_floor_cents: i64,
    pub unusual_limit: usize,

    // Savings
    pub savings_low_pct: f64,
    pub savings_high_pct: f64,
    pub savings_alert_low_pct: f64,
    pub savings_success_pct: f64,

    // Recommendations
    pub monitor_trend_pct: f64,
    pub dominant_share_pct: f64,
    pub emergency_fund_months: i64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            window_months: 6,
            trend_stable_below_pct: 5.0,
            trend_insight_above_pct: 10.0,
            major_expense_cents: 50_000, // $500/month
            budget_warning_above_pct: 75.0,
            budget_exceeded_above_pct: 100.0,
            top_categories_limit: 5,
            unusual_multiple: 3.0,
            unusual_floor_cents: 10_000, // $100
            unusual_limit: 5,
            savings_low_pct: 10.0,
            savings_high_pct: 30.0,
            savings_alert_low_pct: 5.0,
            savings_success_pct: 20.0,
            monitor_trend_pct: 15.0,
            dominant_share_pct: 30.0,
            emergency_fund_months: 6,
        }
    }
}

impl InsightsConfig {
    /// Load configuration, preferring `override_path` when it exists
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);

        let content = match path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading insights config override");
                fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// The embedded configuration, ignoring any override file
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    fn validate(self) -> Result<Self> {
        if self.window_months == 0 {
            return Err(Error::Config("window.months must be at least 1".into()));
        }
        if self.budget_warning_above_pct > self.budget_exceeded_above_pct {
            return Err(Error::Config(
                "budgets.warning_above_pct must not exceed budgets.exceeded_above_pct".into(),
            ));
        }
        if self.unusual_multiple <= 0.0 {
            return Err(Error::Config("summary.unusual_multiple must be positive".into()));
        }
        Ok(self)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    window: Option<RawWindow>,
    trends: Option<RawTrends>,
    budgets: Option<RawBudgets>,
    summary: Option<RawSummary>,
    savings: Option<RawSavings>,
    recommendations: Option<RawRecommendations>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawTrends {
    stable_below_pct: Option<f64>,
    insight_above_pct: Option<f64>,
    major_expense_cents: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawBudgets {
    warning_above_pct: Option<f64>,
    exceeded_above_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    top_categories_limit: Option<usize>,
    unusual_multiple: Option<f64>,
    unusual_floor_cents: Option<i64>,
    unusual_limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawSavings {
    low_pct: Option<f64>,
    high_pct: Option<f64>,
    alert_low_pct: Option<f64>,
    success_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendations {
    monitor_trend_pct: Option<f64>,
    dominant_share_pct: Option<f64>,
    emergency_fund_months: Option<i64>,
}

/// Parse config from TOML content, applying values over the defaults
fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();

    if let Some(window) = raw.window {
        if let Some(months) = window.months {
            config.window_months = months;
        }
    }

    if let Some(trends) = raw.trends {
        if let Some(v) = trends.stable_below_pct {
            config.trend_stable_below_pct = v;
        }
        if let Some(v) = trends.insight_above_pct {
            config.trend_insight_above_pct = v;
        }
        if let Some(v) = trends.major_expense_cents {
            config.major_expense_cents = v;
        }
    }

    if let Some(budgets) = raw.budgets {
        if let Some(v) = budgets.warning_above_pct {
            config.budget_warning_above_pct = v;
        }
        if let Some(v) = budgets.exceeded_above_pct {
            config.budget_exceeded_above_pct = v;
        }
    }

    if let Some(summary) = raw.summary {
        if let Some(v) = summary.top_categories_limit {
            config.top_categories_limit = v;
        }
        if let Some(v) = summary.unusual_multiple {
            config.unusual_multiple = v;
        }
        if let Some(v) = summary.unusual_floor_cents {
            config.unusual_floor_cents = v;
        }
        if let Some(v) = summary.unusual_limit {
            config.unusual_limit = v;
        }
    }

    if let Some(savings) = raw.savings {
        if let Some(v) = savings.low_pct {
            config.savings_low_pct = v;
        }
        if let Some(v) = savings.high_pct {
            config.savings_high_pct = v;
        }
        if let Some(v) = savings.alert_low_pct {
            config.savings_alert_low_pct = v;
        }
        if let Some(v) = savings.success_pct {
            config.savings_success_pct = v;
        }
    }

    if let Some(recs) = raw.recommendations {
        if let Some(v) = recs.monitor_trend_pct {
            config.monitor_trend_pct = v;
        }
        if let Some(v) = recs.dominant_share_pct {
            config.dominant_share_pct = v;
        }
        if let Some(v) = recs.emergency_fund_months {
            config.emergency_fund_months = v;
        }
    }

    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = InsightsConfig::embedded().unwrap();
        assert_eq!(config, InsightsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [budgets]
            warning_above_pct = 80.0

            [summary]
            unusual_limit = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.budget_warning_above_pct, 80.0);
        assert_eq!(config.unusual_limit, 10);
        // Untouched keys keep defaults
        assert_eq!(config.window_months, 6);
        assert_eq!(config.unusual_floor_cents, 10_000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(parse_config("[window]\nmonths = 0").is_err());
        assert!(parse_config("[budgets]\nwarning_above_pct = 120.0").is_err());
        assert!(parse_config("[unknown]\nkey = 1").is_err());
        assert!(parse_config("not toml at all [").is_err());
    }

    #[test]
    fn test_load_from_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.toml");
        fs::write(&path, "[window]\nmonths = 3\n").unwrap();

        let config = InsightsConfig::load(Some(&path)).unwrap();
        assert_eq!(config.window_months, 3);
    }

    #[test]
    fn test_load_missing_override_falls_back() {
        let config = InsightsConfig::load(Some(Path::new("/nonexistent/tally.toml"))).unwrap();
        assert_eq!(config, InsightsConfig::default());
    }
}
