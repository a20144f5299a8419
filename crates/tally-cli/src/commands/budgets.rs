//! Budget command implementations

use anyhow::Result;
use chrono::Local;
use tally_core::{db::Database, insights::ALL_CATEGORIES, money::format_cents, Period, UserId};

use super::{parse_amount_arg, parse_period_arg};

pub fn cmd_budgets_list(db: &Database, user: UserId, period: Option<&str>) -> Result<()> {
    let period = period.map(parse_period_arg).transpose()?;
    let budgets = db.list_budgets(user, period)?;

    if budgets.is_empty() {
        println!("No budgets found. Set one with:");
        println!("  tally budgets set --amount 450 --category Groceries");
        return Ok(());
    }

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────────────");

    for budget in budgets {
        let covers = budget.category_name.as_deref().unwrap_or(ALL_CATEGORIES);
        println!(
            "   {} │ {:>12} │ {} ({})",
            budget.period,
            format_cents(budget.amount),
            budget.name,
            covers
        );
    }

    Ok(())
}

/// Create or update the budget for a category (or all categories) and month
pub fn cmd_budgets_set(
    db: &Database,
    user: UserId,
    amount: &str,
    period: Option<&str>,
    category: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    let amount = parse_amount_arg(amount)?;
    let period = match period {
        Some(p) => parse_period_arg(p)?,
        None => Period::from_date(Local::now().date_naive()),
    };

    let category = match category {
        Some(cat) => Some(db.get_category_by_name(user, cat)?.ok_or_else(|| {
            anyhow::anyhow!(
                "Category '{}' not found. Add it with: tally categories add \"{}\"",
                cat,
                cat
            )
        })?),
        None => None,
    };

    let name = name
        .map(str::to_string)
        .or_else(|| category.as_ref().map(|c| c.name.clone()))
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    db.upsert_budget(user, &name, category.as_ref().map(|c| c.id), amount, period)?;

    println!(
        "✅ Budget '{}' set to {} for {}",
        name,
        format_cents(amount),
        period
    );
    Ok(())
}
