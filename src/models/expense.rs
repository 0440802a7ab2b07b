use crate::models::category::Category;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One logged expense.
///
/// `category` and `date` are kept as text: records loaded from disk may carry
/// categories outside [`Category::ALL`] or dates that were edited by hand, and
/// both are shown and aggregated as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date: String,
}

impl Expense {
    pub fn new(name: String, amount: Decimal, category: Category, date: NaiveDate) -> Self {
        Self {
            name,
            amount,
            category: category.as_str().to_string(),
            date: date.format(DATE_FORMAT).to_string(),
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
