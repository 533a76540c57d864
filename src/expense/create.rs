//! The add-expense form and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    expense::{Amount, NewExpense, create_expense},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, form_error_message},
    redirect::redirect_after_post,
    trip::{TripId, get_trip, trip_page_view},
    user::{User, UserId, get_all_users},
};

/// Form data for adding an expense to a trip.
///
/// The amount is kept as text so that invalid input can be shown back to the user.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseFormData {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    pub payer_id: Option<i64>,
}

impl ExpenseFormData {
    fn parse(&self, trip_id: TripId) -> Result<NewExpense, Error> {
        let amount: Amount = self.amount.parse()?;
        let payer_id = self.payer_id.map(UserId::new).ok_or(Error::MissingPayer)?;

        NewExpense::new(&self.description, amount, trip_id, payer_id)
    }
}

/// The state needed for adding an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the add-expense form for the trip `trip_id` and redirect back to the trip page.
///
/// Invalid input re-renders the form with an error message and nothing is stored.
/// When the expense cannot be stored, htmx requests get an alert and plain form
/// posts get the trip page back with the error under the form.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseEndpointState>,
    Path(trip_id): Path<i64>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let trip_id = TripId::new(trip_id);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return if is_htmx_request {
                Error::DatabaseLockError.into_alert_response()
            } else {
                Error::DatabaseLockError.into_response()
            };
        }
    };

    if let Err(error) = get_trip(trip_id, &connection) {
        return if is_htmx_request {
            error.into_alert_response()
        } else {
            error.into_response()
        };
    }

    let new_expense = match form.parse(trip_id) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            let error_message = format!("Error: {error}");

            return if is_htmx_request {
                match get_all_users(&connection) {
                    Ok(users) => {
                        expense_form_view(trip_id, &users, &form, &error_message).into_response()
                    }
                    Err(error) => error.into_alert_response(),
                }
            } else {
                match trip_page_view(trip_id, &form, &error_message, &connection) {
                    Ok(page) => page.into_response(),
                    Err(error) => error.into_response(),
                }
            };
        }
    };

    match create_expense(new_expense, &connection) {
        Ok(expense) => {
            tracing::info!("Added expense {} to trip {trip_id}", expense.id);
            let trip_page = format_endpoint(endpoints::TRIP_VIEW, trip_id.as_i64());
            redirect_after_post(&trip_page, is_htmx_request)
        }
        Err(error) => {
            if error != Error::InvalidForeignKey {
                tracing::error!("An unexpected error occurred while adding an expense: {error}");
            }

            if is_htmx_request {
                return error.into_alert_response();
            }

            let (status_code, error_message) = error.into_form_error_message();
            match trip_page_view(trip_id, &form, &error_message, &connection) {
                Ok(page) => (status_code, page).into_response(),
                Err(error) => error.into_response(),
            }
        }
    }
}

/// The form for adding an expense to the trip `trip_id`, with one payer option per user.
///
/// `form` holds the values to fill in, e.g. after a failed submission.
pub fn expense_form_view(
    trip_id: TripId,
    users: &[User],
    form: &ExpenseFormData,
    error_message: &str,
) -> Markup {
    let endpoint = format_endpoint(endpoints::TRIP_EXPENSES_API, trip_id.as_i64());

    html! {
        form
            id="expense-form"
            action=(endpoint)
            method="post"
            hx-post=(endpoint)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="Dinner, fuel, tickets..."
                    value=(form.description)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(form.amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="payer_id" class=(FORM_LABEL_STYLE) { "Paid by" }

                select
                    id="payer_id"
                    name="payer_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Select who paid" }

                    @for user in users {
                        @if Some(user.id.as_i64()) == form.payer_id {
                            option value=(user.id) selected { (user.name) }
                        } @else {
                            option value=(user.id) { (user.name) }
                        }
                    }
                }
            }

            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}
