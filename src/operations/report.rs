use crate::models::category::Category;
use crate::models::expense::Expense;
use crate::operations::browse::money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::{self, Write};

const MONTH_KEY_LEN: usize = 7;

/// Sums saturate at [`Decimal::MAX`]; amounts edited into the data file by
/// hand are not bounded like typed-in ones.
pub fn grand_total<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .fold(Decimal::ZERO, |acc, expense| acc.saturating_add(expense.amount))
}

/// One entry per fixed category, in [`Category::ALL`] order, zero when unused.
/// Categories outside the fixed set are left out.
pub fn totals_by_category(expenses: &[Expense]) -> Vec<(Category, Decimal)> {
    Category::ALL
        .iter()
        .map(|&category| {
            let total = grand_total(
                expenses
                    .iter()
                    .filter(|expense| expense.category == category.as_str()),
            );
            (category, total)
        })
        .collect()
}

/// Sums per `YYYY-MM`, ascending. A date too short to hold a month is
/// counted under `today`'s month.
pub fn totals_by_month(expenses: &[Expense], today: NaiveDate) -> Vec<(String, Decimal)> {
    let fallback = today.format("%Y-%m").to_string();
    let mut monthly: BTreeMap<String, Decimal> = BTreeMap::new();

    for expense in expenses {
        let key = if expense.date.chars().count() >= MONTH_KEY_LEN {
            expense.date.chars().take(MONTH_KEY_LEN).collect()
        } else {
            fallback.clone()
        };
        let total = monthly.entry(key).or_insert(Decimal::ZERO);
        *total = total.saturating_add(expense.amount);
    }

    monthly.into_iter().collect()
}

pub fn write_category_totals<W: Write>(out: &mut W, totals: &[(Category, Decimal)]) -> io::Result<()> {
    writeln!(out, "\nCategory Totals:")?;
    for (category, total) in totals {
        writeln!(out, "  {:<12} ${:>7}", category, money(*total))?;
    }
    writeln!(out)
}

pub fn write_month_totals<W: Write>(out: &mut W, totals: &[(String, Decimal)]) -> io::Result<()> {
    writeln!(out, "\nMonthly Totals:")?;
    for (month, total) in totals {
        writeln!(out, "  {}: ${:>7}", month, money(*total))?;
    }
    writeln!(out)
}
