//! Transaction command implementations

use anyhow::Result;
use tally_core::{db::Database, money::format_cents, NewTransaction, TransactionKind, UserId};

use super::{parse_amount_arg, parse_date_arg, parse_kind_arg, truncate};

pub fn cmd_transactions_list(db: &Database, user: UserId, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(user, limit)?;

    if transactions.is_empty() {
        println!("No transactions found. Import some with:");
        println!("  tally import --file ledger.csv");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.kind {
            // Red for expenses, green for income
            TransactionKind::Expense => format!("\x1b[31m-{}\x1b[0m", format_cents(tx.amount)),
            TransactionKind::Income => format!("\x1b[32m+{}\x1b[0m", format_cents(tx.amount)),
        };

        println!(
            "   {} │ {:>12} │ {}",
            tx.occurred_on,
            amount_str,
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}

/// Record one transaction; a missing category is created with the transaction's kind
pub fn cmd_transactions_add(
    db: &Database,
    user: UserId,
    date: &str,
    amount: &str,
    kind: &str,
    category: Option<&str>,
    description: &str,
) -> Result<()> {
    let occurred_on = parse_date_arg(date)?;
    let amount = parse_amount_arg(amount)?;
    let kind = parse_kind_arg(kind)?;

    let category_id = match category {
        Some(name) => Some(match db.get_category_by_name(user, name)? {
            Some(existing) => existing.id,
            None => {
                println!("   Created category '{}'", name.trim());
                db.upsert_category(user, name, kind)?
            }
        }),
        None => None,
    };

    let tx = NewTransaction {
        occurred_on,
        description: description.to_string(),
        amount,
        kind,
        category_id,
        import_hash: None,
    };

    // Without an import hash the insert is never skipped
    let id = db
        .insert_transaction(user, &tx)?
        .ok_or_else(|| anyhow::anyhow!("Transaction was not recorded"))?;

    println!(
        "✅ Recorded {} of {} on {} [id {}]",
        kind,
        format_cents(amount),
        occurred_on,
        id
    );
    Ok(())
}
