//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/trips/{trip_id}', use [format_endpoint].

/// The dashboard listing users and trips.
pub const ROOT: &str = "/";
/// The page for creating a new user.
pub const NEW_USER_VIEW: &str = "/users/new";
/// The page for creating a new trip.
pub const NEW_TRIP_VIEW: &str = "/trips/new";
/// The page for a trip's expenses and balances.
pub const TRIP_VIEW: &str = "/trips/{trip_id}";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a user.
pub const USERS_API: &str = "/api/users";
/// The route to create a trip.
pub const TRIPS_API: &str = "/api/trips";
/// The route to add an expense to a trip.
pub const TRIP_EXPENSES_API: &str = "/api/trips/{trip_id}/expenses";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/trips/{trip_id}', '{trip_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
