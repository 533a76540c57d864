//! Database operations for users.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    user::{Email, User, UserId, UserName},
};

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns an [Error::DuplicateEmail] if another user already has `email`, or
/// an [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(name: UserName, email: Email, connection: &Connection) -> Result<User, Error> {
    connection
        .execute(
            "INSERT INTO user (name, email) VALUES (?1, ?2)",
            (name.as_ref(), email.as_ref()),
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail(email.to_string())
            }
            error => Error::from(error),
        })?;

    let id = UserId::new(connection.last_insert_rowid());

    Ok(User { id, name, email })
}

/// Retrieve all users in the order they were created.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, name, email FROM user ORDER BY id ASC")?
        .query_map([], map_row)?
        .map(|maybe_user| maybe_user.map_err(Error::from))
        .collect()
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let id = UserId::new(row.get(0)?);
    let raw_name: String = row.get(1)?;
    let raw_email: String = row.get(2)?;

    Ok(User {
        id,
        name: UserName::new_unchecked(&raw_name),
        email: Email::new_unchecked(&raw_email),
    })
}
