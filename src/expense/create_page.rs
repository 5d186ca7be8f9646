//! Defines the route handler for the page with the new expense form.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    category::CategoryTable,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base, loading_spinner, rupee_input_styles,
    },
    navigation::NavBar,
    record::PaymentMethod,
};

/// The state needed for the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpenseViewState {
    /// The injected category table.
    pub categories: Arc<CategoryTable>,
}

impl FromRef<AppState> for NewExpenseViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            categories: state.categories.clone(),
        }
    }
}

/// Display the form for recording a new expense.
pub async fn get_new_expense_page(State(state): State<NewExpenseViewState>) -> Response {
    new_expense_view(&state.categories).into_response()
}

fn new_expense_view(categories: &CategoryTable) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-lg mx-auto" {
                h1 class="text-xl font-semibold tracking-tight" { "Add New Expense" }
                p class="text-sm text-gray-600 dark:text-gray-400 mt-1 mb-6" {
                    "Record a new expense with details"
                }

                (new_expense_form(categories))
            }
        }
    };

    base("Add Expense", &[rupee_input_styles()], &content)
}

fn new_expense_form(categories: &CategoryTable) -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                div class="input-wrapper" {
                    input
                        id="amount"
                        type="text"
                        inputmode="decimal"
                        name="amount"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                textarea
                    id="description"
                    name="description"
                    placeholder="What was this expense for?"
                    required
                    class={(FORM_TEXT_INPUT_STYLE) " resize-none"}
                {}
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                div {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE) {
                        option value="" disabled selected { "Select category" }
                        @for category in categories.categories() {
                            option value=(category.key) { (category.name) }
                        }
                    }
                }

                div {
                    label for="payment_method" class=(FORM_LABEL_STYLE) { "Payment Method" }
                    select
                        id="payment_method"
                        name="payment_method"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" disabled selected { "Select payment method" }
                        @for method in PaymentMethod::ALL {
                            option value=(method.as_key()) { (method.display_name()) }
                        }
                    }
                }
            }

            div {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    id="date"
                    type="date"
                    name="date"
                    class=(FORM_TEXT_INPUT_STYLE);
                p class="mt-1 text-xs text-gray-600 dark:text-gray-400" {
                    "Leave blank to use today's date."
                }
            }

            div class="flex justify-end gap-3 pt-2" {
                a
                    href=(endpoints::EXPENSES_VIEW)
                    class="px-4 py-2 text-sm font-medium text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 dark:bg-gray-800 dark:text-gray-400 dark:border-gray-600 dark:hover:bg-gray-700"
                {
                    "Cancel"
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) {
                    span id="indicator" class="htmx-indicator" { (loading_spinner()) }
                    "Save Expense"
                }
            }
        }
    }
}
