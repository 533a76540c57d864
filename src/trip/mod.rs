//! Trips that collect shared expenses, and the trip detail page with the
//! settlement of who owes what.

mod create;
mod db;
mod detail;
mod domain;

pub use create::{create_trip_endpoint, get_new_trip_page};
pub use db::{create_trip, create_trip_table, get_all_trips, get_trip};
pub use detail::get_trip_page;
pub(crate) use detail::trip_page_view;
pub use domain::{Trip, TripId, TripName};
