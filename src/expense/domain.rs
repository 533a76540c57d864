//! Core expense domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    trip::TripId,
    user::{UserId, UserName},
};

/// A newtype wrapper for integer expense IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Create a new expense ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the expense ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A sum of money that is finite and not negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a number of dollars.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `dollars` is negative, NaN or infinite.
    pub fn new(dollars: f64) -> Result<Self, Error> {
        if dollars.is_finite() && dollars >= 0.0 {
            // Adding zero turns -0.0 into 0.0.
            Ok(Self(dollars + 0.0))
        } else {
            Err(Error::InvalidAmount(dollars.to_string()))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `dollars` is finite and not negative.
    pub fn new_unchecked(dollars: f64) -> Self {
        Self(dollars)
    }

    /// The amount in dollars.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        s.parse::<f64>()
            .ok()
            .and_then(|dollars| Amount::new(dollars).ok())
            .ok_or_else(|| Error::InvalidAmount(s.to_owned()))
    }
}

/// Round `dollars` to the nearest cent.
///
/// Values that round to zero from below come back as `-0.0`, which compares
/// equal to `0.0`.
pub fn round_to_cents(dollars: f64) -> f64 {
    (dollars * 100.0).round() / 100.0
}

/// A single cost paid by one user as part of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: Amount,
    /// The trip the expense belongs to.
    pub trip_id: TripId,
    /// The user who paid for the expense.
    pub payer_id: UserId,
}

/// An expense together with the name of the user who paid for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseWithPayer {
    /// The expense.
    pub expense: Expense,
    /// The name of the user with the ID `expense.payer_id`.
    pub payer_name: UserName,
}

/// A validated expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on, trimmed and non-empty.
    pub description: String,
    /// How much was spent.
    pub amount: Amount,
    /// The trip the expense belongs to.
    pub trip_id: TripId,
    /// The user who paid for the expense.
    pub payer_id: UserId,
}

impl NewExpense {
    /// Create a new expense for `trip_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyExpenseDescription] if `description` is empty or only whitespace.
    pub fn new(
        description: &str,
        amount: Amount,
        trip_id: TripId,
        payer_id: UserId,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyExpenseDescription);
        }

        Ok(Self {
            description: description.to_owned(),
            amount,
            trip_id,
            payer_id,
        })
    }
}

#[cfg(test)]
mod amount_tests {
    use crate::{Error, expense::Amount};

    #[test]
    fn parses_decimal_string() {
        assert_eq!("12.34".parse(), Ok(Amount::new_unchecked(12.34)));
        assert_eq!(" 100 ".parse(), Ok(Amount::new_unchecked(100.0)));
    }

    #[test]
    fn zero_is_valid() {
        assert_eq!("0".parse(), Ok(Amount::new_unchecked(0.0)));
        assert_eq!(
            "-0".parse::<Amount>()
                .map(|amount| amount.as_f64().is_sign_positive()),
            Ok(true)
        );
    }

    #[test]
    fn rejects_negative_amount() {
        assert_eq!(
            "-5".parse::<Amount>(),
            Err(Error::InvalidAmount("-5".to_owned()))
        );
    }

    #[test]
    fn rejects_non_numeric_and_empty_strings() {
        assert_eq!(
            "ten".parse::<Amount>(),
            Err(Error::InvalidAmount("ten".to_owned()))
        );
        assert_eq!("".parse::<Amount>(), Err(Error::InvalidAmount(String::new())));
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!("NaN".parse::<Amount>().is_err());
        assert!("inf".parse::<Amount>().is_err());
        assert!(Amount::new(f64::NEG_INFINITY).is_err());
    }
}

#[cfg(test)]
mod new_expense_tests {
    use crate::{
        Error,
        expense::{Amount, NewExpense},
        trip::TripId,
        user::UserId,
    };

    #[test]
    fn trims_description() {
        let expense = NewExpense::new(
            "  Petrol ",
            Amount::new_unchecked(80.0),
            TripId::new(1),
            UserId::new(2),
        )
        .unwrap();

        assert_eq!(expense.description, "Petrol");
    }

    #[test]
    fn fails_on_empty_description() {
        let result = NewExpense::new(
            " ",
            Amount::new_unchecked(80.0),
            TripId::new(1),
            UserId::new(2),
        );

        assert_eq!(result, Err(Error::EmptyExpenseDescription));
    }
}
