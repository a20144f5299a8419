//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Personal finance tracker with spending insights
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// User whose ledger to operate on
    #[arg(long, default_value_t = 1, global = true)]
    pub user: i64,

    /// Insights config file (defaults to ~/.local/share/tally/config/insights.toml
    /// when present, else built-in thresholds)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Import ledger rows from CSV (date,description,amount,kind,category)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show spending insights for the trailing six months
    Insights {
        /// Analyze as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,

        /// Print the raw insights as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// income or expense
        #[arg(long, default_value = "expense")]
        kind: String,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Record a transaction
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Amount in dollars, e.g. 12.34
        #[arg(long)]
        amount: String,

        /// income or expense
        #[arg(long, default_value = "expense")]
        kind: String,

        /// Category name (created if missing)
        #[arg(long)]
        category: Option<String>,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List {
        /// Only budgets for this month (YYYY-MM)
        #[arg(long)]
        period: Option<String>,
    },

    /// Create or update a monthly budget
    Set {
        /// Limit in dollars, e.g. 450.00
        #[arg(long)]
        amount: String,

        /// Month (YYYY-MM), defaults to the current month
        #[arg(long)]
        period: Option<String>,

        /// Category name; omit for a budget covering all categories
        #[arg(long)]
        category: Option<String>,

        /// Budget name (defaults to the category name)
        #[arg(long)]
        name: Option<String>,
    },
}
