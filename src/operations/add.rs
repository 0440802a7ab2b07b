use crate::db::error::StoreError;
use crate::db::persistence;
use crate::db::store::ExpenseStore;
use crate::models::expense::{DATE_FORMAT, Expense};
use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

/// Outcome of reading the optional date field.
#[derive(Debug, PartialEq)]
pub enum DateInput {
    /// Field left blank.
    Today(NaiveDate),
    Parsed(NaiveDate),
    /// Unparseable text, replaced by today's date.
    Invalid(NaiveDate),
}

impl DateInput {
    pub fn date(&self) -> NaiveDate {
        match self {
            DateInput::Today(d) | DateInput::Parsed(d) | DateInput::Invalid(d) => *d,
        }
    }
}

pub fn parse_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    if name.is_empty() {
        return Err("Name cannot be empty.".to_string());
    }
    Ok(name.to_string())
}

/// Largest accepted amount.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
/// Most decimal places accepted for an amount.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Amounts are bounded to at most 14 significant digits, which the JSON
/// number encoding reproduces exactly on reload.
pub fn parse_amount(input: &str) -> Result<Decimal, String> {
    let input = input.trim();
    let amount = Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| "Please enter a valid non-negative number.".to_string())?;
    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if amount.is_sign_negative() {
        return Err("Please enter a valid non-negative number.".to_string());
    }
    if amount > MAX_AMOUNT {
        return Err(format!("Amount cannot be more than {}.", MAX_AMOUNT));
    }
    let amount = amount.normalize();
    if amount.scale() > MAX_AMOUNT_SCALE {
        return Err(format!(
            "Amount can have at most {} decimal places.",
            MAX_AMOUNT_SCALE
        ));
    }
    Ok(amount)
}

pub fn parse_date_or_today(input: &str, today: NaiveDate) -> DateInput {
    let input = input.trim();
    if input.is_empty() {
        return DateInput::Today(today);
    }
    match NaiveDate::parse_from_str(input, DATE_FORMAT) {
        Ok(date) => DateInput::Parsed(date),
        Err(_) => DateInput::Invalid(today),
    }
}

/// Appends `expense` and rewrites the data file.
///
/// On a save failure the expense stays in memory; the error tells the caller
/// the change is not on disk.
pub fn add_expense(store: &mut ExpenseStore, path: &Path, expense: Expense) -> Result<(), StoreError> {
    info!("Adding expense '{}' ({}) on {}", expense.name, expense.category, expense.date);
    store.add(expense);
    persistence::save_expenses(path, store.all())
}
