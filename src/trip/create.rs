//! Trip creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    redirect::redirect_after_post,
    trip::{TripName, create_trip, domain::TripFormData},
};

/// The state needed for creating a trip.
#[derive(Debug, Clone)]
pub struct CreateTripEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTripEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the trip creation page.
pub async fn get_new_trip_page() -> Response {
    new_trip_view(&TripFormData::default(), "").into_response()
}

/// Handle trip creation form submission and redirect to the new trip's page.
pub async fn create_trip_endpoint(
    State(state): State<CreateTripEndpointState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<TripFormData>,
) -> Response {
    let name = match TripName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            let error_message = format!("Error: {error}");

            return if is_htmx_request {
                new_trip_form_view(&form, &error_message).into_response()
            } else {
                new_trip_view(&form, &error_message).into_response()
            };
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_trip(name, &form.description, &connection) {
        Ok(trip) => {
            tracing::info!("Created trip {}", trip.id);
            let trip_page = format_endpoint(endpoints::TRIP_VIEW, trip.id.as_i64());
            redirect_after_post(&trip_page, is_htmx_request)
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a trip: {error}");

            error.into_alert_response()
        }
    }
}

fn new_trip_view(form: &TripFormData, error_message: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRIP_VIEW).into_html();
    let form = new_trip_form_view(form, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) {
            h2 class="text-2xl font-bold mb-4" { "Plan a Trip" }
            (form)
        }
    };

    base("Create Trip", &[], &content)
}

fn new_trip_form_view(form: &TripFormData, error_message: &str) -> Markup {
    html! {
        form
            action=(endpoints::TRIPS_API)
            method="post"
            hx-post=(endpoints::TRIPS_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Trip Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Trip Name"
                    value=(form.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                textarea
                    id="description"
                    name="description"
                    rows="3"
                    placeholder="Where are you going?"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form.description)
                }
            }

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Trip" }
        }
    }
}


#[cfg(test)]
mod create_trip_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use axum_htmx::HxRequest;
    use rusqlite::Connection;

    use crate::{
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, get_header,
            must_get_form, parse_html_fragment,
        },
        trip::{
            Trip, TripId, TripName, create::CreateTripEndpointState, create_trip_endpoint,
            create_trip_table, domain::TripFormData, get_all_trips,
        },
    };

    fn get_trip_state() -> CreateTripEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_trip_table(&connection).expect("Could not create trip table");

        CreateTripEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn form(name: &str, description: &str) -> TripFormData {
        TripFormData {
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_trip() {
        let state = get_trip_state();

        let response = create_trip_endpoint(
            State(state.clone()),
            HxRequest(true),
            Form(form("Ski Weekend", "Mt Ruapehu")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/trips/1");
        assert_eq!(
            get_all_trips(&state.db_connection.lock().unwrap()),
            Ok(vec![Trip {
                id: TripId::new(1),
                name: TripName::new_unchecked("Ski Weekend"),
                description: "Mt Ruapehu".to_owned(),
            }])
        );
    }

    #[tokio::test]
    async fn can_create_trip_without_description() {
        let state = get_trip_state();

        let response = create_trip_endpoint(
            State(state.clone()),
            HxRequest(false),
            Form(form("Ski Weekend", "")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), "/trips/1");
        let trips = get_all_trips(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(trips[0].description, "");
    }

    #[tokio::test]
    async fn create_trip_fails_on_empty_name() {
        let state = get_trip_state();

        let response = create_trip_endpoint(
            State(state.clone()),
            HxRequest(true),
            Form(form("   ", "Somewhere")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Trip name cannot be empty");
        assert_eq!(get_all_trips(&state.db_connection.lock().unwrap()), Ok(vec![]));
    }
}
