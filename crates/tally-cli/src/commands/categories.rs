//! Category command implementations

use anyhow::{Context, Result};
use tally_core::{db::Database, UserId};

use super::parse_kind_arg;

pub fn cmd_categories_list(db: &Database, user: UserId) -> Result<()> {
    let categories = db.list_categories(user)?;

    if categories.is_empty() {
        println!("No categories yet. Add one with:");
        println!("  tally categories add Groceries");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────");

    for category in categories {
        println!(
            "   [{:>3}] {:<24} {}",
            category.id, category.name, category.kind
        );
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, user: UserId, name: &str, kind: &str) -> Result<()> {
    let kind = parse_kind_arg(kind)?;
    let id = db
        .upsert_category(user, name, kind)
        .with_context(|| format!("Failed to add category '{}'", name))?;

    println!("✅ Category '{}' ({}) ready [id {}]", name.trim(), kind, id);
    Ok(())
}
