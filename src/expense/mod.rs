//! Expenses logged against a trip and paid by one user.

mod create;
mod db;
mod domain;

pub use create::{ExpenseFormData, create_expense_endpoint, expense_form_view};
pub use db::{create_expense, create_expense_table, get_expenses_for_trip};
pub use domain::{Amount, Expense, ExpenseId, ExpenseWithPayer, NewExpense, round_to_cents};
