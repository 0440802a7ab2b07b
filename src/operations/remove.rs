use crate::db::error::StoreError;
use crate::db::persistence;
use crate::db::store::ExpenseStore;
use crate::models::expense::Expense;
use log::info;
use std::path::Path;

pub fn parse_position(input: &str) -> Result<usize, String> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| "Please enter a valid number.".to_string())
}

/// Removes the expense at the 1-based `position` of the full listing and
/// rewrites the data file. Nothing is written when the position is invalid.
pub fn remove_expense(
    store: &mut ExpenseStore,
    path: &Path,
    position: usize,
) -> Result<Expense, StoreError> {
    let removed = store.delete(position)?;
    info!("Deleted expense #{} '{}'", position, removed.name);
    persistence::save_expenses(path, store.all())?;
    Ok(removed)
}
