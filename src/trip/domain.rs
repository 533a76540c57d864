//! Core trip domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer trip IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct TripId(i64);

impl TripId {
    /// Create a new trip ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the trip ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name of a trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripName(String);

impl TripName {
    /// Create a trip name.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is an empty string or
    /// only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyTripName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a trip name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for TripName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TripName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named event that accumulates shared expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// The ID of the trip.
    pub id: TripId,
    /// The name of the trip.
    pub name: TripName,
    /// A free-form description, empty if none was given.
    pub description: String,
}

/// Form data for creating a trip.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TripFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
