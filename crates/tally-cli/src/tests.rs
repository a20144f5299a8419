//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use chrono::NaiveDate;
use clap::Parser;
use tally_core::db::Database;
use tally_core::insights::{AIInsights, InsightEngine};
use tally_core::{Period, TransactionKind};

use crate::cli::{BudgetsAction, Cli, Commands, TransactionsAction};
use crate::commands::{self, truncate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const LEDGER: &str = "date,description,amount,kind,category
2024-02-01,Paycheck,3000.00,income,Salary
2024-03-01,Paycheck,3000.00,income,Salary
2024-02-04,Corner Market,-200.00,,Groceries
2024-03-04,Corner Market,-260.00,,Groceries
";

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "tally",
        "--db",
        "ledger.db",
        "--user",
        "7",
        "insights",
        "--as-of",
        "2024-03-20",
        "--json",
    ])
    .unwrap();

    assert_eq!(cli.db.to_str(), Some("ledger.db"));
    assert_eq!(cli.user, 7);
    match cli.command {
        Commands::Insights { as_of, json } => {
            assert_eq!(as_of.as_deref(), Some("2024-03-20"));
            assert!(json);
        }
        _ => panic!("expected insights command"),
    }
}

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["tally", "transactions", "list"]).unwrap();
    assert_eq!(cli.db.to_str(), Some("tally.db"));
    assert_eq!(cli.user, 1);
    assert!(cli.config.is_none());
    assert!(matches!(
        cli.command,
        Commands::Transactions {
            action: Some(TransactionsAction::List { limit: 20 })
        }
    ));
}

#[test]
fn test_parse_budget_set() {
    let cli = Cli::try_parse_from([
        "tally",
        "budgets",
        "set",
        "--amount",
        "450",
        "--category",
        "Groceries",
    ])
    .unwrap();

    match cli.command {
        Commands::Budgets {
            action:
                Some(BudgetsAction::Set {
                    amount,
                    period,
                    category,
                    name,
                }),
        } => {
            assert_eq!(amount, "450");
            assert!(period.is_none());
            assert_eq!(category.as_deref(), Some("Groceries"));
            assert!(name.is_none());
        }
        _ => panic!("expected budgets set"),
    }
}

#[test]
fn test_parse_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["tally", "serve"]).is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer description", 10), "a much ...");
    // Multi-byte characters are not split
    assert_eq!(truncate("cafécafécafé", 6), "caf...");
}

#[test]
fn test_parse_args() {
    assert_eq!(commands::parse_amount_arg("$1,204.50").unwrap(), 120_450);
    assert!(commands::parse_amount_arg("-3").is_err());
    assert!(commands::parse_amount_arg("abc").is_err());
    assert_eq!(
        commands::parse_kind_arg("income").unwrap(),
        TransactionKind::Income
    );
    assert!(commands::parse_kind_arg("transfer").is_err());
    assert_eq!(commands::parse_date_arg("2024-03-05").unwrap(), date(2024, 3, 5));
    assert!(commands::parse_date_arg("03/05/2024").is_err());
    assert_eq!(
        commands::parse_period_arg("2024-03").unwrap(),
        Period::new(2024, 3).unwrap()
    );
}

// ========== Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path).unwrap();
    assert!(db.list_categories(1).unwrap().is_empty());
}

#[test]
fn test_cmd_categories() {
    let db = Database::in_memory().unwrap();

    commands::cmd_categories_add(&db, 1, "Salary", "income").unwrap();
    commands::cmd_categories_add(&db, 1, "Salary", "income").unwrap();
    assert!(commands::cmd_categories_add(&db, 1, "Gifts", "transfer").is_err());

    let categories = db.list_categories(1).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].kind, TransactionKind::Income);

    assert!(commands::cmd_categories_list(&db, 1).is_ok());
}

#[test]
fn test_cmd_transactions_add_creates_category() {
    let db = Database::in_memory().unwrap();

    commands::cmd_transactions_add(
        &db,
        1,
        "2024-03-05",
        "12.34",
        "expense",
        Some("Coffee"),
        "Flat white",
    )
    .unwrap();

    let coffee = db.get_category_by_name(1, "Coffee").unwrap().unwrap();
    let txs = db.list_transactions(1, 10).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, 1_234);
    assert_eq!(txs[0].category_id, Some(coffee.id));
    assert_eq!(txs[0].description, "Flat white");

    assert!(commands::cmd_transactions_list(&db, 1, 20).is_ok());
}

#[test]
fn test_cmd_transactions_add_rejects_bad_input() {
    let db = Database::in_memory().unwrap();
    assert!(
        commands::cmd_transactions_add(&db, 1, "yesterday", "1", "expense", None, "").is_err()
    );
    assert!(
        commands::cmd_transactions_add(&db, 1, "2024-03-05", "-1", "expense", None, "").is_err()
    );
    assert!(db.list_transactions(1, 10).unwrap().is_empty());
}

#[test]
fn test_cmd_budgets_set_and_list() {
    let db = Database::in_memory().unwrap();
    commands::cmd_categories_add(&db, 1, "Groceries", "expense").unwrap();

    commands::cmd_budgets_set(&db, 1, "450", Some("2024-03"), Some("Groceries"), None).unwrap();
    commands::cmd_budgets_set(&db, 1, "2000", Some("2024-03"), None, None).unwrap();

    let budgets = db
        .list_budgets(1, Some(Period::new(2024, 3).unwrap()))
        .unwrap();
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0].name, "Groceries");
    assert_eq!(budgets[0].amount, 45_000);
    assert_eq!(budgets[1].name, "All categories");
    assert_eq!(budgets[1].category_id, None);

    assert!(commands::cmd_budgets_list(&db, 1, Some("2024-03")).is_ok());
    assert!(commands::cmd_budgets_list(&db, 1, Some("March")).is_err());
}

#[test]
fn test_cmd_budgets_set_unknown_category() {
    let db = Database::in_memory().unwrap();
    let err = commands::cmd_budgets_set(&db, 1, "100", Some("2024-03"), Some("Nope"), None)
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_cmd_import() {
    let db = Database::in_memory().unwrap();
    let file = write_temp(LEDGER);

    let stats = commands::cmd_import(&db, 1, file.path()).unwrap();
    assert_eq!(stats.imported, 4);
    assert_eq!(stats.categories_created, 2);

    let again = commands::cmd_import(&db, 1, file.path()).unwrap();
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, 4);
}

#[test]
fn test_cmd_import_missing_file() {
    let db = Database::in_memory().unwrap();
    let err = commands::cmd_import(&db, 1, std::path::Path::new("/nonexistent/ledger.csv"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to open file"));
}

// ========== Insights Tests ==========

#[tokio::test]
async fn test_cmd_insights_runs() {
    let db = Database::in_memory().unwrap();
    let file = write_temp(LEDGER);
    commands::cmd_import(&db, 1, file.path()).unwrap();

    assert!(
        commands::cmd_insights(&db, 1, None, Some("2024-03-20"), false)
            .await
            .is_ok()
    );
    assert!(
        commands::cmd_insights(&db, 1, None, Some("2024-03-20"), true)
            .await
            .is_ok()
    );
    assert!(commands::cmd_insights(&db, 1, None, Some("soon"), false)
        .await
        .is_err());
}

#[tokio::test]
async fn test_cmd_insights_missing_config() {
    let db = Database::in_memory().unwrap();
    let missing = std::path::Path::new("/nonexistent/insights.toml");
    let err = commands::cmd_insights(&db, 1, Some(missing), Some("2024-03-20"), false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_load_config_override() {
    let file = write_temp("[window]\nmonths = 3\n");
    let config = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(config.window_months, 3);
    // Untouched keys keep their defaults
    assert_eq!(config.budget_warning_above_pct, 75.0);
}

#[tokio::test]
async fn test_render_insights() {
    let db = Database::in_memory().unwrap();
    let file = write_temp(LEDGER);
    commands::cmd_import(&db, 1, file.path()).unwrap();
    commands::cmd_budgets_set(&db, 1, "250", Some("2024-03"), Some("Groceries"), None).unwrap();

    let insights = InsightEngine::new()
        .generate_insights_at(&db, 1, date(2024, 3, 20))
        .await
        .unwrap();
    let report = commands::render_insights(&insights);

    assert!(report.contains("Income:"));
    assert!(report.contains("$3,000.00"));
    assert!(report.contains("Groceries"));
    assert!(report.contains("Spending in Groceries increased by 26.1%"));
    assert!(report.contains("$260.00 of"));
    assert!(report.contains("Recommendations"));
}

#[test]
fn test_render_empty_insights() {
    let report = commands::render_insights(&AIInsights::default());
    assert!(report.contains("No activity"));
    assert!(!report.contains("Recommendations"));
}
