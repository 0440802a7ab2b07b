use crate::models::expense::Expense;

/// Expenses whose category matches exactly, in stored order.
pub fn search_expenses_by_category<'a>(category: &str, expenses: &'a [Expense]) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|expense| expense.category == category)
        .collect()
}
