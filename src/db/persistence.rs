//! JSON file backing for the expense list.
//!
//! The whole list is rewritten on every save. Loading is best effort: a file
//! that cannot be decoded is treated as an empty list, and the next save
//! replaces it.

use crate::db::error::StoreError;
use crate::models::expense::{DATE_FORMAT, Expense};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const DATA_FILE: &str = "expenses.json";

/// On-disk shape of a record. Files written before dates were tracked have
/// no `date` key.
#[derive(Debug, Deserialize)]
struct StoredExpense {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: String,
    #[serde(default)]
    date: Option<String>,
}

pub fn load_expenses(path: &Path, today: NaiveDate) -> Result<Vec<Expense>, StoreError> {
    if !path.exists() {
        debug!("No data file at {}, starting empty", path.display());
        return Ok(Vec::new());
    }

    let bytes = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let stored: Vec<StoredExpense> = match serde_json::from_slice(&bytes) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(
                "Data file {} is empty or unreadable ({}), treating it as empty",
                path.display(),
                e
            );
            return Ok(Vec::new());
        }
    };

    let today_iso = today.format(DATE_FORMAT).to_string();
    let mut backfilled = 0;
    let expenses: Vec<Expense> = stored
        .into_iter()
        .map(|s| {
            let date = s.date.unwrap_or_else(|| {
                backfilled += 1;
                today_iso.clone()
            });
            Expense {
                name: s.name,
                amount: s.amount,
                category: s.category,
                date,
            }
        })
        .collect();

    if backfilled > 0 {
        info!("Backfilled date {} on {} expenses", today_iso, backfilled);
    }
    info!("Loaded {} expenses from {}", expenses.len(), path.display());
    Ok(expenses)
}

pub fn save_expenses(path: &Path, expenses: &[Expense]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(expenses)?;
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&json).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Saved {} expenses to {}", expenses.len(), path.display());
    Ok(())
}
