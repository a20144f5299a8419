//! Tally CLI - Personal finance tracker with spending insights
//!
//! Usage:
//!   tally init                      Initialize database
//!   tally import --file ledger.csv  Import ledger rows
//!   tally budgets set --amount 450 --category Groceries
//!   tally insights [--json]         Show spending insights

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let user = cli.user;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(CategoriesAction::List) => commands::cmd_categories_list(&db, user),
                Some(CategoriesAction::Add { name, kind }) => {
                    commands::cmd_categories_add(&db, user, &name, &kind)
                }
            }
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_transactions_list(&db, user, 20),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, user, limit)
                }
                Some(TransactionsAction::Add {
                    date,
                    amount,
                    kind,
                    category,
                    description,
                }) => commands::cmd_transactions_add(
                    &db,
                    user,
                    &date,
                    &amount,
                    &kind,
                    category.as_deref(),
                    &description,
                ),
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_budgets_list(&db, user, None),
                Some(BudgetsAction::List { period }) => {
                    commands::cmd_budgets_list(&db, user, period.as_deref())
                }
                Some(BudgetsAction::Set {
                    amount,
                    period,
                    category,
                    name,
                }) => commands::cmd_budgets_set(
                    &db,
                    user,
                    &amount,
                    period.as_deref(),
                    category.as_deref(),
                    name.as_deref(),
                ),
            }
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, user, &file).map(|_| ())
        }
        Commands::Insights { as_of, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db, user, cli.config.as_deref(), as_of.as_deref(), json).await
        }
    }
}
