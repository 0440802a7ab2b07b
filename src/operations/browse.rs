use crate::models::expense::Expense;
use crate::operations::report::grand_total;
use rust_decimal::Decimal;
use std::io::{self, Write};

const NAME_WIDTH: usize = 28;

/// Two-decimal rendering of an amount, without currency sign or padding.
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn truncate_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}

/// Writes the numbered expense table followed by its total row.
///
/// Row numbers start at 1; for the full listing they are the positions
/// accepted by delete.
pub fn write_listing<'a, W, I>(out: &mut W, expenses: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Expense>,
{
    let expenses: Vec<&Expense> = expenses.into_iter().collect();

    writeln!(out, "\n#  Date        Name                          Amount    Category")?;
    writeln!(out, "-- ----------  ---------------------------- --------- -----------")?;
    for (idx, expense) in expenses.iter().enumerate() {
        writeln!(
            out,
            "{:>2} {}  {:<width$} ${:>7}  {}",
            idx + 1,
            expense.date,
            truncate_name(&expense.name),
            money(expense.amount),
            expense.category,
            width = NAME_WIDTH
        )?;
    }
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(
        out,
        "   Total ------------------------------->   ${:>7}\n",
        money(grand_total(expenses.iter().copied()))
    )
}
