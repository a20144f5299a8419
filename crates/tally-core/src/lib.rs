//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - SQLite ledger store with connection pooling and migrations
//! - CSV ledger import
//! - Financial insights engine (spending trends, budget utilization,
//!   monthly summary, recommendations and alerts)
//! - Engine threshold configuration

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod money;

/// Test utilities: snapshot builders and in-memory ledger loaders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::InsightsConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use import::{import_rows, parse_ledger_csv, ImportStats, NewLedgerRow};
pub use insights::{AIInsights, InsightEngine, LedgerLoader, LedgerSnapshot};
pub use models::{
    Budget, Category, LedgerEntry, NewTransaction, Period, Transaction, TransactionKind, UserId,
};
