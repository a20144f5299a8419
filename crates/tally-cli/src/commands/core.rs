//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - Parsers shared by several commands

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{db::Database, money::parse_cents, Period, TransactionKind};

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    println!("✅ Database initialized at {}", db.path());
    println!();
    println!("Next steps:");
    println!("  1. Import transactions: tally import --file ledger.csv");
    println!("  2. Set a budget: tally budgets set --amount 450 --category Groceries");
    println!("  3. See insights: tally insights");

    Ok(())
}

pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date (use YYYY-MM-DD): {}", s))
}

pub fn parse_kind_arg(s: &str) -> Result<TransactionKind> {
    s.parse().map_err(anyhow::Error::msg)
}

pub fn parse_amount_arg(s: &str) -> Result<i64> {
    let cents = parse_cents(s).with_context(|| format!("Invalid amount: {}", s))?;
    if cents < 0 {
        anyhow::bail!("Amount must not be negative: {}", s);
    }
    Ok(cents)
}

pub fn parse_period_arg(s: &str) -> Result<Period> {
    s.parse::<Period>()
        .with_context(|| format!("Invalid period: {}", s))
}
