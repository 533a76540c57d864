//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    expense::create_expense_endpoint,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    trip::{create_trip_endpoint, get_new_trip_page, get_trip_page},
    user::{create_user_endpoint, get_new_user_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::NEW_USER_VIEW, get(get_new_user_page))
        .route(endpoints::NEW_TRIP_VIEW, get(get_new_trip_page))
        .route(endpoints::TRIP_VIEW, get(get_trip_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::USERS_API, post(create_user_endpoint))
        .route(endpoints::TRIPS_API, post(create_trip_endpoint))
        .route(
            endpoints::TRIP_EXPENSES_API,
            post(create_expense_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
