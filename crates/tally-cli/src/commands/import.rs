//! Import command implementation

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{
    db::Database,
    import::{import_rows, parse_ledger_csv, ImportStats},
    UserId,
};

pub fn cmd_import(db: &Database, user: UserId, file: &Path) -> Result<ImportStats> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    println!("📥 Importing ledger rows from {}...", file.display());

    let rows = parse_ledger_csv(BufReader::new(csv_file))
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    println!("   Parsed {} rows", rows.len());

    let stats = import_rows(db, user, &rows).context("Failed to import rows")?;

    println!();
    println!("✅ Import complete!");
    println!("   Imported: {}", stats.imported);
    println!("   Skipped (duplicates): {}", stats.skipped);
    if stats.categories_created > 0 {
        println!("   New categories: {}", stats.categories_created);
    }

    Ok(stats)
}
