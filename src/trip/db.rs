//! Database operations for trips.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    trip::{Trip, TripId, TripName},
};

/// Initialize the trip table.
pub fn create_trip_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS trip (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );",
        (),
    )?;

    Ok(())
}

/// Create a trip and return it with its generated ID.
///
/// Leading and trailing whitespace is removed from `description`.
pub fn create_trip(
    name: TripName,
    description: &str,
    connection: &Connection,
) -> Result<Trip, Error> {
    let description = description.trim().to_owned();

    connection.execute(
        "INSERT INTO trip (name, description) VALUES (?1, ?2);",
        (name.as_ref(), &description),
    )?;

    let id = TripId::new(connection.last_insert_rowid());

    Ok(Trip {
        id,
        name,
        description,
    })
}

/// Retrieve a single trip by ID.
///
/// # Errors
///
/// Returns [Error::NotFound] if no trip has the ID `trip_id`.
pub fn get_trip(trip_id: TripId, connection: &Connection) -> Result<Trip, Error> {
    connection
        .prepare("SELECT id, name, description FROM trip WHERE id = :id;")?
        .query_row(&[(":id", &trip_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all trips in the order they were created.
pub fn get_all_trips(connection: &Connection) -> Result<Vec<Trip>, Error> {
    connection
        .prepare("SELECT id, name, description FROM trip ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_trip| maybe_trip.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Trip, rusqlite::Error> {
    let id = TripId::new(row.get(0)?);
    let raw_name: String = row.get(1)?;
    let description = row.get(2)?;

    Ok(Trip {
        id,
        name: TripName::new_unchecked(&raw_name),
        description,
    })
}
