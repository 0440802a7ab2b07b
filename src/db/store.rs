use crate::db::error::StoreError;
use crate::models::expense::Expense;

/// In-memory owner of the expense sequence.
///
/// Insertion order is display order and storage order. Positions handed to
/// [`ExpenseStore::delete`] are 1-based, matching the numbers shown in the
/// full listing.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn delete(&mut self, position: usize) -> Result<Expense, StoreError> {
        let len = self.expenses.len();
        if position == 0 || position > len {
            return Err(StoreError::OutOfRange { position, len });
        }
        Ok(self.expenses.remove(position - 1))
    }

    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
