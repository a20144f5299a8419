//! Ledger operations: categories, transactions and budgets

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_date, Database};
use crate::error::{Error, Result};
use crate::models::{
    Budget, Category, LedgerEntry, NewTransaction, Period, Transaction, TransactionKind, UserId,
};

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, message.into())
}

fn parse_kind(column: usize, s: &str) -> rusqlite::Result<TransactionKind> {
    s.parse().map_err(|e: String| conversion_error(column, e))
}

fn parse_period(column: usize, s: &str) -> rusqlite::Result<Period> {
    s.parse()
        .map_err(|e: Error| conversion_error(column, e.to_string()))
}

const TRANSACTION_COLUMNS: &str =
    "t.id, t.amount, t.kind, t.date, t.category_id, t.description";

/// Map `TRANSACTION_COLUMNS` starting at column 0
fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let kind: String = row.get(2)?;
    let date: String = row.get(3)?;
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        kind: parse_kind(2, &kind)?,
        occurred_on: parse_date(3, &date)?,
        category_id: row.get(4)?,
        description: row.get(5)?,
    })
}

impl Database {
    /// Create or get a category by name
    pub fn upsert_category(
        &self,
        user_id: UserId,
        name: &str,
        kind: TransactionKind,
    ) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name cannot be empty".into()));
        }

        let conn = self.conn()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM categories WHERE user_id = ? AND name = ?",
                params![user_id, name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO categories (user_id, name, kind) VALUES (?, ?, ?)",
            params![user_id, name, kind.as_str()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's categories, sorted by name
    pub fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, kind FROM categories WHERE user_id = ? ORDER BY name")?;

        let categories = stmt
            .query_map(params![user_id], |row| {
                let kind: String = row.get(2)?;
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    kind: parse_kind(2, &kind)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn get_category_by_name(&self, user_id: UserId, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, kind FROM categories WHERE user_id = ? AND name = ?",
                params![user_id, name.trim()],
                |row| {
                    let kind: String = row.get(2)?;
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        kind: parse_kind(2, &kind)?,
                    })
                },
            )
            .optional()?;

        Ok(category)
    }

    /// Insert a transaction (skips duplicates based on import_hash)
    ///
    /// Returns `None` when a transaction with the same import hash exists.
    pub fn insert_transaction(&self, user_id: UserId, tx: &NewTransaction) -> Result<Option<i64>> {
        if tx.amount < 0 {
            return Err(Error::InvalidData(format!(
                "Transaction amount must not be negative: {}",
                tx.amount
            )));
        }

        let conn = self.conn()?;

        if let Some(hash) = &tx.import_hash {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM transactions WHERE user_id = ? AND import_hash = ?",
                    params![user_id, hash],
                    |row| row.get(0),
                )
                .optional()?;

            if existing.is_some() {
                return Ok(None); // Duplicate, skip
            }
        }

        conn.execute(
            r#"
            INSERT INTO transactions
                (user_id, date, description, amount, kind, category_id, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.occurred_on.to_string(),
                tx.description,
                tx.amount,
                tx.kind.as_str(),
                tx.category_id,
                tx.import_hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// Most recent transactions first
    pub fn list_transactions(&self, user_id: UserId, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions t WHERE t.user_id = ? \
             ORDER BY t.date DESC, t.id DESC LIMIT ?",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let transactions = stmt
            .query_map(params![user_id, limit], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Transactions dated `from..=to` joined with their category,
    /// ordered by date then id
    pub fn list_ledger_entries(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {}, c.id, c.name, c.kind
            FROM transactions t
            LEFT JOIN categories c ON c.id = t.category_id
            WHERE t.user_id = ? AND t.date >= ? AND t.date <= ?
            ORDER BY t.date, t.id
            "#,
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let entries = stmt
            .query_map(
                params![user_id, from.to_string(), to.to_string()],
                |row| {
                    let transaction = row_to_transaction(row)?;
                    let category_id: Option<i64> = row.get(6)?;
                    let category = match category_id {
                        Some(id) => {
                            let kind: String = row.get(8)?;
                            Some(Category {
                                id,
                                name: row.get(7)?,
                                kind: parse_kind(8, &kind)?,
                            })
                        }
                        None => None,
                    };
                    Ok(LedgerEntry {
                        transaction,
                        category,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Create or update the budget for (`category_id`, `period`)
    ///
    /// A `None` category sets the all-categories budget for the month.
    pub fn upsert_budget(
        &self,
        user_id: UserId,
        name: &str,
        category_id: Option<i64>,
        amount: i64,
        period: Period,
    ) -> Result<i64> {
        if amount < 0 {
            return Err(Error::InvalidData(format!(
                "Budget amount must not be negative: {}",
                amount
            )));
        }

        let conn = self.conn()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM budgets WHERE user_id = ? AND period = ? AND category_id IS ?",
                params![user_id, period.to_string(), category_id],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            conn.execute(
                "UPDATE budgets SET name = ?, amount = ? WHERE id = ?",
                params![name, amount, id],
            )?;
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO budgets (user_id, name, category_id, amount, period) \
             VALUES (?, ?, ?, ?, ?)",
            params![user_id, name, category_id, amount, period.to_string()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List budgets, optionally restricted to one period, in creation order
    pub fn list_budgets(&self, user_id: UserId, period: Option<Period>) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT b.id, b.name, b.category_id, c.name, b.amount, b.period
            FROM budgets b
            LEFT JOIN categories c ON c.id = b.category_id
            WHERE b.user_id = ?1 AND (?2 IS NULL OR b.period = ?2)
            ORDER BY b.id
            "#,
        )?;

        let budgets = stmt
            .query_map(params![user_id, period.map(|p| p.to_string())], |row| {
                let period: String = row.get(5)?;
                Ok(Budget {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category_id: row.get(2)?,
                    category_name: row.get(3)?,
                    amount: row.get(4)?,
                    period: parse_period(5, &period)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }
}
