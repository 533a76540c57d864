//! Database operations for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    expense::{Amount, Expense, ExpenseId, ExpenseWithPayer, NewExpense},
    trip::TripId,
    user::{UserId, UserName},
};

/// Initialize the expense table and indexes.
///
/// The trip and user tables must be created first.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            trip_id INTEGER NOT NULL REFERENCES trip(id),
            payer_id INTEGER NOT NULL REFERENCES user(id)
        );

        CREATE INDEX IF NOT EXISTS idx_expense_trip_id ON expense(trip_id);",
    )?;

    Ok(())
}

/// Create an expense and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::InvalidForeignKey] if the trip or the payer does not exist
/// (requires foreign keys to be enabled on `connection`).
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (description, amount, trip_id, payer_id) VALUES (?1, ?2, ?3, ?4);",
        (
            &new_expense.description,
            new_expense.amount.as_f64(),
            new_expense.trip_id.as_i64(),
            new_expense.payer_id.as_i64(),
        ),
    )?;

    let id = ExpenseId::new(connection.last_insert_rowid());

    Ok(Expense {
        id,
        description: new_expense.description,
        amount: new_expense.amount,
        trip_id: new_expense.trip_id,
        payer_id: new_expense.payer_id,
    })
}

/// Retrieve the expenses of a trip in the order they were created, along with
/// the name of the user who paid each one.
pub fn get_expenses_for_trip(
    trip_id: TripId,
    connection: &Connection,
) -> Result<Vec<ExpenseWithPayer>, Error> {
    connection
        .prepare(
            "SELECT expense.id, expense.description, expense.amount, expense.trip_id,
                expense.payer_id, user.name
            FROM expense
            INNER JOIN user ON user.id = expense.payer_id
            WHERE expense.trip_id = :trip_id
            ORDER BY expense.id ASC;",
        )?
        .query_map(&[(":trip_id", &trip_id.as_i64())], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<ExpenseWithPayer, rusqlite::Error> {
    let payer_name: String = row.get(5)?;

    Ok(ExpenseWithPayer {
        expense: Expense {
            id: ExpenseId::new(row.get(0)?),
            description: row.get(1)?,
            amount: Amount::new_unchecked(row.get(2)?),
            trip_id: TripId::new(row.get(3)?),
            payer_id: UserId::new(row.get(4)?),
        },
        payer_name: UserName::new_unchecked(&payer_name),
    })
}
