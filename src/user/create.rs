//! User creation page and endpoint.

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
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        form_error_message,
    },
    navigation::NavBar,
    redirect::redirect_after_post,
    user::{Email, UserName, create_user, domain::UserFormData},
};

/// The state needed for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateUserEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the user creation page.
pub async fn get_new_user_page() -> Response {
    new_user_view(&UserFormData::default(), "").into_response()
}

/// Handle user creation form submission.
///
/// Invalid input re-renders the form with an error message and nothing is
/// stored. Other failures are sent as an alert to htmx requests, while plain
/// form posts get the full page back with the error under the form.
pub async fn create_user_endpoint(
    State(state): State<CreateUserEndpointState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<UserFormData>,
) -> Response {
    let validated = UserName::new(&form.name)
        .and_then(|name| Email::new(&form.email).map(|email| (name, email)));

    let (name, email) = match validated {
        Ok(fields) => fields,
        Err(error) => {
            let error_message = format!("Error: {error}");

            return if is_htmx_request {
                new_user_form_view(&form, &error_message).into_response()
            } else {
                new_user_view(&form, &error_message).into_response()
            };
        }
    };

    let result = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| create_user(name, email, &connection));

    match result {
        Ok(user) => {
            tracing::info!("Created user {}", user.id);
            redirect_after_post(endpoints::ROOT, is_htmx_request)
        }
        Err(error) => {
            if !matches!(error, Error::DuplicateEmail(_)) {
                tracing::error!("An unexpected error occurred while creating a user: {error}");
            }

            if is_htmx_request {
                error.into_alert_response()
            } else {
                let (status_code, error_message) = error.into_form_error_message();
                (status_code, new_user_view(&form, &error_message)).into_response()
            }
        }
    }
}

fn new_user_view(form: &UserFormData, error_message: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_USER_VIEW).into_html();
    let form = new_user_form_view(form, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) {
            h2 class="text-2xl font-bold mb-4" { "Create User" }
            (form)
        }
    };

    base("Create User", &[], &content)
}

fn new_user_form_view(form: &UserFormData, error_message: &str) -> Markup {
    html! {
        form
            action=(endpoints::USERS_API)
            method="post"
            hx-post=(endpoints::USERS_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Name"
                    value=(form.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    id="email"
                    type="email"
                    name="email"
                    placeholder="name@example.com"
                    value=(form.email)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create User" }
        }
    }
}
