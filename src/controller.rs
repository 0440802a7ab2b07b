use crate::db::error::StoreError;
use crate::db::store::ExpenseStore;
use crate::models::category::Category;
use crate::models::expense::{DATE_FORMAT, Expense, today};
use crate::operations::add::{self, DateInput};
use crate::operations::browse::{money, write_listing};
use crate::operations::remove;
use crate::operations::report;
use crate::operations::search_by_category::search_expenses_by_category;
use log::error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ViewAll,
    Delete,
    ViewByCategory,
    TotalsByCategory,
    TotalsByMonth,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::ViewAll),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::ViewByCategory),
            "5" => Some(MenuChoice::TotalsByCategory),
            "6" => Some(MenuChoice::TotalsByMonth),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Whether the session goes on after an action.
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

/// Menu loop over a line-oriented reader and writer.
///
/// Owns the expense store for the session and rewrites `data_file` after
/// every add or delete. Closing the input ends the session.
pub struct Controller<R, W> {
    store: ExpenseStore,
    data_file: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(store: ExpenseStore, data_file: PathBuf, input: R, output: W) -> Self {
        Self {
            store,
            data_file,
            input,
            output,
        }
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.prompt("Choose an option (1-7): ")? else {
                return Ok(());
            };

            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::Add) => self.add_expense()?,
                Some(MenuChoice::ViewAll) => {
                    write_listing(&mut self.output, self.store.all())?;
                    Flow::Continue
                }
                Some(MenuChoice::Delete) => self.delete_expense()?,
                Some(MenuChoice::ViewByCategory) => self.view_by_category()?,
                Some(MenuChoice::TotalsByCategory) => {
                    let totals = report::totals_by_category(self.store.all());
                    report::write_category_totals(&mut self.output, &totals)?;
                    Flow::Continue
                }
                Some(MenuChoice::TotalsByMonth) => {
                    let totals = report::totals_by_month(self.store.all(), today());
                    report::write_month_totals(&mut self.output, &totals)?;
                    Flow::Continue
                }
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Goodbye! Keep budgeting smart!")?;
                    Flow::Quit
                }
                None => {
                    writeln!(self.output, "Invalid choice. Please select 1-7.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                self.output.flush()?;
                return Ok(());
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n==== Expense Tracker ====")?;
        writeln!(self.output, "1. Add Expense")?;
        writeln!(self.output, "2. View All Expenses")?;
        writeln!(self.output, "3. Delete Expense")?;
        writeln!(self.output, "4. View by Category")?;
        writeln!(self.output, "5. Totals by Category")?;
        writeln!(self.output, "6. Totals by Month")?;
        writeln!(self.output, "7. Exit")
    }

    /// Prints `message` and reads one trimmed line; `None` once input is closed.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn choose_category(&mut self, message: &str) -> io::Result<Option<Category>> {
        writeln!(self.output, "\nCategories:")?;
        for (idx, category) in Category::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, category)?;
        }

        let prompt = format!("{} (1-{}): ", message, Category::ALL.len());
        loop {
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            match Category::from_choice(&line) {
                Some(category) => return Ok(Some(category)),
                None => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }
    }

    fn add_expense(&mut self) -> io::Result<Flow> {
        let name = loop {
            let Some(line) = self.prompt("\nExpense name: ")? else {
                return Ok(Flow::Quit);
            };
            match add::parse_name(&line) {
                Ok(name) => break name,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        };

        let amount = loop {
            let Some(line) = self.prompt("Amount (numbers only): ")? else {
                return Ok(Flow::Quit);
            };
            match add::parse_amount(&line) {
                Ok(amount) => break amount,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        };

        let Some(category) = self.choose_category("Choose a category")? else {
            return Ok(Flow::Quit);
        };

        let Some(line) = self.prompt("Date (YYYY-MM-DD), press Enter for today: ")? else {
            return Ok(Flow::Quit);
        };
        let date_input = add::parse_date_or_today(&line, today());
        if let DateInput::Invalid(_) = date_input {
            writeln!(self.output, "Invalid date format. Using today instead.")?;
        }
        let date = date_input.date();

        let expense = Expense::new(name.clone(), amount, category, date);
        match add::add_expense(&mut self.store, &self.data_file, expense) {
            Ok(()) => writeln!(
                self.output,
                "Added: {} - ${} [{}] on {}",
                name,
                money(amount),
                category,
                date.format(DATE_FORMAT)
            )?,
            Err(e) => self.report_save_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_expense(&mut self) -> io::Result<Flow> {
        write_listing(&mut self.output, self.store.all())?;
        if self.store.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(line) = self.prompt("Enter expense number to delete: ")? else {
            return Ok(Flow::Quit);
        };
        let position = match remove::parse_position(&line) {
            Ok(position) => position,
            Err(message) => {
                writeln!(self.output, "{message}")?;
                return Ok(Flow::Continue);
            }
        };

        match remove::remove_expense(&mut self.store, &self.data_file, position) {
            Ok(removed) => writeln!(
                self.output,
                "Deleted: {} (${})",
                removed.name,
                money(removed.amount)
            )?,
            Err(StoreError::OutOfRange { .. }) => writeln!(self.output, "Invalid number.")?,
            Err(e) => self.report_save_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn view_by_category(&mut self) -> io::Result<Flow> {
        let Some(category) = self.choose_category("View which category")? else {
            return Ok(Flow::Quit);
        };

        let matches = search_expenses_by_category(category.as_str(), self.store.all());
        if matches.is_empty() {
            writeln!(self.output, "\n(No expenses in '{}')\n", category)?;
        } else {
            writeln!(self.output, "\n== {} ==", category)?;
            write_listing(&mut self.output, matches)?;
        }
        Ok(Flow::Continue)
    }

    fn report_save_error(&mut self, e: &StoreError) -> io::Result<()> {
        error!("Save failed: {}", e);
        writeln!(self.output, "Error saving expenses: {}", e)?;
        writeln!(self.output, "The change is kept for this session but is not on disk.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::persistence::{self, DATA_FILE};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Cursor;
    use tempfile::{TempDir, tempdir};

    fn create_test_expense(name: &str, cents: i64, category: Category, day: u32) -> Expense {
        Expense::new(
            name.to_string(),
            Decimal::new(cents, 2),
            category,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        )
    }

    /// Runs a scripted session and returns the controller's store and output.
    fn run_session(dir: &TempDir, expenses: Vec<Expense>, script: &str) -> (ExpenseStore, String) {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        let mut controller = Controller::new(
            ExpenseStore::from_expenses(expenses),
            dir.path().join(DATA_FILE),
            input,
            &mut output,
        );
        controller.run().unwrap();
        let store = std::mem::take(&mut controller.store);
        drop(controller);
        (store, String::from_utf8(output).unwrap())
    }

    fn load(dir: &TempDir) -> Vec<Expense> {
        persistence::load_expenses(&dir.path().join(DATA_FILE), today()).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 7 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_exit_prints_farewell() {
        let dir = tempdir().unwrap();
        let (_, output) = run_session(&dir, vec![], "7\n");

        assert!(output.contains("==== Expense Tracker ===="));
        assert!(output.ends_with("Goodbye! Keep budgeting smart!\n"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let dir = tempdir().unwrap();
        let (store, output) = run_session(&dir, vec![], "");

        assert!(store.is_empty());
        assert!(!output.contains("Goodbye"));
    }

    #[test]
    fn test_invalid_menu_choice_reprompts() {
        let dir = tempdir().unwrap();
        let (_, output) = run_session(&dir, vec![], "9\nhello\n7\n");

        assert_eq!(output.matches("Invalid choice. Please select 1-7.").count(), 2);
        assert_eq!(output.matches("==== Expense Tracker ====").count(), 3);
    }

    #[test]
    fn test_add_expense_with_reprompts() {
        let dir = tempdir().unwrap();
        let script = "1\n\nCoffee\nabc\n-2\n4.5\n0\n1\n2025-01-10\n7\n";
        let (store, output) = run_session(&dir, vec![], script);

        assert!(output.contains("Name cannot be empty."));
        assert_eq!(output.matches("Please enter a valid non-negative number.").count(), 2);
        assert!(output.contains("Invalid choice. Try again."));
        assert!(output.contains("Added: Coffee - $4.50 [Food] on 2025-01-10"));

        assert_eq!(store.len(), 1);
        assert_eq!(load(&dir), store.all());
    }

    #[test]
    fn test_add_expense_invalid_date_uses_today() {
        let dir = tempdir().unwrap();
        let (store, output) = run_session(&dir, vec![], "1\nBus\n2\n2\nyesterday\n7\n");

        assert!(output.contains("Invalid date format. Using today instead."));
        let expected = today().format(DATE_FORMAT).to_string();
        assert_eq!(store.all()[0].date, expected);
        assert_eq!(store.all()[0].category, "Transport");
    }

    #[test]
    fn test_add_expense_blank_date_uses_today() {
        let dir = tempdir().unwrap();
        let (store, output) = run_session(&dir, vec![], "1\nRent\n800\n3\n\n7\n");

        assert!(!output.contains("Invalid date format"));
        assert_eq!(store.all()[0].date, today().format(DATE_FORMAT).to_string());
    }

    #[test]
    fn test_add_expense_save_failure_is_reported() {
        let dir = tempdir().unwrap();
        let input = Cursor::new(b"1\nCoffee\n4.5\n1\n2025-01-10\n7\n".to_vec());
        let mut output: Vec<u8> = Vec::new();
        let mut controller = Controller::new(
            ExpenseStore::default(),
            dir.path().join("missing").join(DATA_FILE),
            input,
            &mut output,
        );
        controller.run().unwrap();
        assert_eq!(controller.store().len(), 1);
        drop(controller);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Error saving expenses: Failed to write"));
        assert!(!output.contains("Added:"));
    }

    #[test]
    fn test_delete_expense_save_failure_is_reported() {
        let dir = tempdir().unwrap();
        let input = Cursor::new(b"3\n1\n2\n7\n".to_vec());
        let mut output: Vec<u8> = Vec::new();
        let mut controller = Controller::new(
            ExpenseStore::from_expenses(vec![
                create_test_expense("Coffee", 450, Category::Food, 10),
                create_test_expense("Bus", 200, Category::Transport, 15),
            ]),
            dir.path().join("missing").join(DATA_FILE),
            input,
            &mut output,
        );
        controller.run().unwrap();
        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.store().all()[0].name, "Bus");
        drop(controller);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Error saving expenses: Failed to write"));
        assert!(output.contains("The change is kept for this session but is not on disk."));
        assert!(!output.contains("Deleted:"));
        assert!(output.contains(" 1 2025-01-15  Bus"));
    }

    #[test]
    fn test_view_all_lists_with_total() {
        let dir = tempdir().unwrap();
        let expenses = vec![
            create_test_expense("Coffee", 450, Category::Food, 10),
            create_test_expense("Bus", 200, Category::Transport, 15),
        ];
        let (_, output) = run_session(&dir, expenses, "2\n7\n");

        assert!(output.contains(" 1 2025-01-10  Coffee"));
        assert!(output.contains(" 2 2025-01-15  Bus"));
        assert!(output.contains("   Total ------------------------------->   $   6.50"));
    }

    #[test]
    fn test_delete_first_of_two() {
        let dir = tempdir().unwrap();
        let expenses = vec![
            create_test_expense("Coffee", 450, Category::Food, 10),
            create_test_expense("Bus", 200, Category::Transport, 15),
        ];
        let (store, output) = run_session(&dir, expenses, "3\n1\n7\n");

        assert!(output.contains("Deleted: Coffee ($4.50)"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].name, "Bus");
        assert_eq!(load(&dir), store.all());
    }

    #[test]
    fn test_delete_out_of_range_and_garbage() {
        let dir = tempdir().unwrap();
        let expenses = vec![create_test_expense("Coffee", 450, Category::Food, 10)];
        let (store, output) = run_session(&dir, expenses, "3\n5\n3\nfirst\n7\n");

        assert!(output.contains("Invalid number."));
        assert!(output.contains("Please enter a valid number."));
        assert_eq!(store.len(), 1);
        assert!(!dir.path().join(DATA_FILE).exists());
    }

    #[test]
    fn test_delete_on_empty_store_does_not_prompt() {
        let dir = tempdir().unwrap();
        let (_, output) = run_session(&dir, vec![], "3\n7\n");

        assert!(!output.contains("Enter expense number to delete"));
        assert!(output.contains("Goodbye"));
    }

    #[test]
    fn test_view_by_category_without_matches() {
        let dir = tempdir().unwrap();
        let expenses = vec![create_test_expense("Coffee", 450, Category::Food, 10)];
        let (_, output) = run_session(&dir, expenses, "4\n3\n7\n");

        assert!(output.contains("(No expenses in 'Bills')"));
        assert!(!output.contains("== Bills =="));
    }

    #[test]
    fn test_view_by_category_with_matches() {
        let dir = tempdir().unwrap();
        let expenses = vec![
            create_test_expense("Coffee", 450, Category::Food, 10),
            create_test_expense("Bus", 200, Category::Transport, 15),
            create_test_expense("Bagel", 300, Category::Food, 16),
        ];
        let (_, output) = run_session(&dir, expenses, "4\n1\n7\n");

        assert!(output.contains("== Food =="));
        assert!(output.contains(" 2 2025-01-16  Bagel"));
        assert!(!output.contains("Bus"));
        assert!(output.contains("$   7.50"));
    }

    #[test]
    fn test_totals_views() {
        let dir = tempdir().unwrap();
        let expenses = vec![
            create_test_expense("Coffee", 450, Category::Food, 10),
            Expense::new(
                "Gym".to_string(),
                Decimal::new(1000, 2),
                Category::Other,
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            ),
        ];
        let (_, output) = run_session(&dir, expenses, "5\n6\n7\n");

        assert!(output.contains("Category Totals:"));
        assert!(output.contains("  Food         $   4.50"));
        assert!(output.contains("  Bills        $   0.00"));
        assert!(output.contains("  Other        $  10.00"));
        assert!(output.contains("Monthly Totals:"));
        assert!(output.contains("  2025-01: $   4.50\n  2025-02: $  10.00"));
    }
}
