//! The trip page: totals, who owes what, the add-expense form and the expense history.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{ExpenseFormData, ExpenseWithPayer, expense_form_view, get_expenses_for_trip},
    html::{
        CARD_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency,
        format_signed_currency, link,
    },
    navigation::NavBar,
    settlement::{BalanceStatus, Settlement, UserBalance, calculate_settlement},
    trip::{Trip, TripId, get_trip},
    user::{User, get_all_users},
};

/// The state needed for the trip page.
#[derive(Debug, Clone)]
pub struct TripPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TripPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for the trip `trip_id`, or the 404 page if the trip does not exist.
pub async fn get_trip_page(
    State(state): State<TripPageState>,
    Path(trip_id): Path<i64>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let page = trip_page_view(
        TripId::new(trip_id),
        &ExpenseFormData::default(),
        "",
        &connection,
    )?;

    Ok(page.into_response())
}

/// Load the trip, its expenses and every user, settle the costs and render the page.
///
/// `form` and `error_message` are passed through to the add-expense form.
///
/// # Errors
///
/// Returns [Error::NotFound] if the trip does not exist, or an SQL error.
pub(crate) fn trip_page_view(
    trip_id: TripId,
    form: &ExpenseFormData,
    error_message: &str,
    connection: &Connection,
) -> Result<Markup, Error> {
    let trip = get_trip(trip_id, connection)?;
    let users = get_all_users(connection)?;
    let expenses = get_expenses_for_trip(trip_id, connection)?;

    let settlement = calculate_settlement(
        &expenses
            .iter()
            .map(|row| row.expense.clone())
            .collect::<Vec<_>>(),
        &users,
    );

    let expense_form = expense_form_view(trip.id, &users, form, error_message);

    Ok(trip_view(&trip, &users, &expenses, &settlement, &expense_form))
}

const SECTION_HEADER_STYLE: &str = "text-xl font-semibold mb-3";

fn trip_view(
    trip: &Trip,
    users: &[User],
    expenses: &[ExpenseWithPayer],
    settlement: &Settlement,
    expense_form: &Markup,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRIP_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-8"
            {
                header
                {
                    h1 class="text-3xl font-bold" { (trip.name) }

                    @if !trip.description.is_empty() {
                        p class="mt-1 text-gray-600 dark:text-gray-400" { (trip.description) }
                    }
                }

                (summary_cards_view(settlement))

                section
                {
                    h2 class=(SECTION_HEADER_STYLE) { "Who owes what?" }

                    @if users.is_empty() {
                        p { "No users yet." }
                    } @else {
                        ul id="balances" class="grid gap-4 sm:grid-cols-2"
                        {
                            @for (user, balance) in users.iter().zip(&settlement.balances) {
                                (balance_card_view(user, balance))
                            }
                        }
                    }
                }

                section class=(CARD_STYLE)
                {
                    h2 class=(SECTION_HEADER_STYLE) { "Add Expense" }
                    (expense_form)
                }

                section
                {
                    h2 class=(SECTION_HEADER_STYLE) { "Expense History" }
                    (expense_history_view(expenses))
                }

                p { (link(endpoints::ROOT, "Back to Dashboard")) }
            }
        }
    };

    base(trip.name.as_ref(), &[dollar_input_styles()], &content)
}

fn summary_cards_view(settlement: &Settlement) -> Markup {
    html! {
        div class="grid gap-4 sm:grid-cols-2"
        {
            div class=(CARD_STYLE)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Total Trip Cost" }
                p id="total-spent" class="text-2xl font-bold"
                {
                    (format_currency(settlement.total_spent))
                }
            }

            div class=(CARD_STYLE)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Per Person Share" }
                p id="fair-share" class="text-2xl font-bold"
                {
                    (format_currency(settlement.fair_share))
                }
            }
        }
    }
}

fn balance_card_view(user: &User, balance: &UserBalance) -> Markup {
    let (badge_text, badge_style, balance_style) = match balance.status() {
        BalanceStatus::Owed => (
            "Get Back",
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300",
            "text-green-600 dark:text-green-400",
        ),
        BalanceStatus::Owes => (
            "Owes",
            "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
            "text-red-600 dark:text-red-400",
        ),
    };

    html! {
        li class=(CARD_STYLE) data-user-id=(user.id)
        {
            div class="flex items-center justify-between"
            {
                span class="font-semibold" { (user.name) }
                span class={ "badge text-xs font-medium px-2.5 py-0.5 rounded " (badge_style) }
                {
                    (badge_text)
                }
            }

            p class="paid text-sm text-gray-500 dark:text-gray-400"
            {
                "Paid: " (format_currency(balance.paid))
            }

            p class={ "balance text-lg font-bold " (balance_style) }
            {
                (format_signed_currency(balance.balance))
            }
        }
    }
}

fn expense_history_view(expenses: &[ExpenseWithPayer]) -> Markup {
    html! {
        @if expenses.is_empty() {
            p class="text-gray-500 dark:text-gray-400" { "No expenses yet." }
        } @else {
            ul id="expenses" class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for row in expenses {
                    li class="flex items-center justify-between py-3"
                    {
                        div
                        {
                            p class="description font-medium" { (row.expense.description) }
                            p class="payer text-sm text-gray-500 dark:text-gray-400"
                            {
                                "Paid by " (row.payer_name)
                            }
                        }

                        span class="amount font-semibold"
                        {
                            (format_currency(row.expense.amount.as_f64()))
                        }
                    }
                }
            }
        }
    }
}
