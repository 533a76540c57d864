//! Users who share the cost of trips.

mod create;
mod db;
mod domain;

pub use create::{create_user_endpoint, get_new_user_page};
pub use db::{count_users, create_user, create_user_table, get_all_users};
pub use domain::{Email, User, UserId, UserName};
