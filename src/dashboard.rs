//! The dashboard lists every user and every trip.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{BUTTON_SECONDARY_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    trip::{Trip, get_all_trips},
    user::{User, get_all_users},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading users and trips.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with all users and all trips.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let users = get_all_users(&connection)
        .inspect_err(|error| tracing::error!("could not get users: {error}"))?;
    let trips = get_all_trips(&connection)
        .inspect_err(|error| tracing::error!("could not get trips: {error}"))?;

    Ok(dashboard_view(&users, &trips).into_response())
}

fn dashboard_view(users: &[User], trips: &[Trip]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl grid gap-8 md:grid-cols-2"
            {
                section id="users" class=(CARD_STYLE)
                {
                    div class="flex items-center justify-between mb-3"
                    {
                        h2 class="text-xl font-semibold" { "Users" }
                        a href=(endpoints::NEW_USER_VIEW) class=(LINK_STYLE) { "New User" }
                    }

                    @if users.is_empty() {
                        p class="text-gray-500 dark:text-gray-400" { "No users yet." }
                    } @else {
                        ul class="space-y-1"
                        {
                            @for user in users {
                                li { (user.name) " (" (user.email) ")" }
                            }
                        }
                    }
                }

                section id="trips" class=(CARD_STYLE)
                {
                    div class="flex items-center justify-between mb-3"
                    {
                        h2 class="text-xl font-semibold" { "Trips" }
                        a href=(endpoints::NEW_TRIP_VIEW) class=(LINK_STYLE) { "New Trip" }
                    }

                    @if trips.is_empty() {
                        p class="text-gray-500 dark:text-gray-400" { "No trips planned. Create one!" }
                    } @else {
                        ul class="space-y-2"
                        {
                            @for trip in trips {
                                li { (trip_link_view(trip)) }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Dashboard", &[], &content)
}

fn trip_link_view(trip: &Trip) -> Markup {
    let trip_url = format_endpoint(endpoints::TRIP_VIEW, trip.id.as_i64());

    html! {
        a href=(trip_url) class={ "block text-left " (BUTTON_SECONDARY_STYLE) }
        {
            span class="block font-semibold" { (trip.name) }

            span class="block text-gray-500 dark:text-gray-400"
            {
                @if trip.description.is_empty() {
                    "No description"
                } @else {
                    (trip.description)
                }
            }
        }
    }
}
