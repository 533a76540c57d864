//! Trip Splitter is a web app for splitting shared trip expenses between
//! friends.
//!
//! Users log expenses against a trip and the app works out how much each
//! person has paid, their fair share of the total, and who owes whom.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod redirect;
mod routing;
mod settlement;
mod trip;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{
    Amount, Expense, ExpenseId, ExpenseWithPayer, NewExpense, create_expense,
    get_expenses_for_trip,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use settlement::{BalanceStatus, Settlement, UserBalance, calculate_settlement};
pub use trip::{Trip, TripId, TripName, create_trip, get_all_trips, get_trip};
pub use user::{Email, User, UserId, UserName, count_users, create_user, get_all_users};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFound};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a user's name.
    #[error("Name cannot be empty")]
    EmptyUserName,

    /// The email address was empty or not a valid email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// The email address is already used by another user.
    ///
    /// Only [create_user] knows the submitted address, so it raises this error
    /// itself instead of converting it from a [rusqlite::Error].
    #[error("The email address {0} is already in use")]
    DuplicateEmail(String),

    /// An empty string was used as a trip's name.
    #[error("Trip name cannot be empty")]
    EmptyTripName,

    /// An empty string was used as an expense's description.
    #[error("Description cannot be empty")]
    EmptyExpenseDescription,

    /// The expense amount could not be parsed as a non-negative number.
    #[error("\"{0}\" is not a valid amount, enter a number that is zero or more")]
    InvalidAmount(String),

    /// An expense was submitted without choosing who paid for it.
    #[error("Choose who paid for the expense")]
    MissingPayer,

    /// A trip or user ID did not refer to a row in the database.
    ///
    /// This occurs when inserting an expense for a trip or payer that does
    /// not exist.
    #[error("the trip or user does not exist")]
    InvalidForeignKey,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::InvalidForeignKey
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFound.into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// The status code, heading and details to show when a form submission fails.
    fn form_failure(&self) -> (StatusCode, &'static str, String) {
        match self {
            Error::DuplicateEmail(email) => (
                StatusCode::BAD_REQUEST,
                "Duplicate Email",
                format!(
                    "The email address {email} is already used by another user. \
                    Choose a different email address."
                ),
            ),
            Error::InvalidForeignKey => (
                StatusCode::BAD_REQUEST,
                "Could not add expense",
                "The trip or the person who paid could not be found. \
                Try refreshing the page."
                    .to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "The trip could not be found. Check the address and try again.".to_owned(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        }
    }

    /// Render the error as an alert fragment for form endpoints.
    fn into_alert_response(self) -> Response {
        let (status_code, message, details) = self.form_failure();

        Alert::error(message, &details).into_response_with_status(status_code)
    }

    /// Render the error as the message shown under a form on a full page,
    /// along with the status code to send the page with.
    fn into_form_error_message(self) -> (StatusCode, String) {
        let (status_code, message, details) = self.form_failure();

        (status_code, format!("{message}: {details}"))
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use rusqlite::Connection;

    use crate::Error;

    #[test]
    fn maps_no_rows_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn maps_foreign_key_violation_to_invalid_foreign_key() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "PRAGMA foreign_keys = ON;
                CREATE TABLE parent (id INTEGER PRIMARY KEY);
                CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id));",
            )
            .unwrap();

        let error = connection
            .execute("INSERT INTO child (parent_id) VALUES (1)", ())
            .unwrap_err();

        assert_eq!(Error::from(error), Error::InvalidForeignKey);
    }

    #[test]
    fn duplicate_email_message_names_the_address() {
        assert_eq!(
            Error::DuplicateEmail("alice@example.com".to_owned()).to_string(),
            "The email address alice@example.com is already in use"
        );
    }

    #[test]
    fn form_error_message_has_heading_and_details() {
        let (status_code, message) =
            Error::DuplicateEmail("alice@example.com".to_owned()).into_form_error_message();

        assert_eq!(status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            message,
            "Duplicate Email: The email address alice@example.com is already used by \
            another user. Choose a different email address."
        );
    }
}
