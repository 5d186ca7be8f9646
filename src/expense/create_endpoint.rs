//! Defines the endpoint for submitting a new expense.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::{Date, PrimitiveDateTime};

use crate::{
    AppState, Error,
    category::CategoryTable,
    endpoints,
    record::{Amount, PaymentMethod, Record},
    submission::SubmissionService,
    timezone::now_local,
};

/// The state needed to accept a new expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The injected category table, for validating the submitted key.
    pub categories: Arc<CategoryTable>,
    /// The service that runs the submission round trip.
    pub submissions: SubmissionService,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            categories: state.categories.clone(),
            submissions: state.submissions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for submitting an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The amount as entered, e.g. "42.99". Parsed and validated here rather
    /// than by serde so a bad value produces an alert instead of a 422.
    pub amount: String,
    /// Text detailing the expense.
    pub description: String,
    /// The category key.
    pub category: String,
    /// How the expense was paid.
    pub payment_method: PaymentMethod,
    /// The date the money was spent. Defaults to today.
    #[serde(default)]
    pub date: Option<Date>,
}

/// A route handler for submitting a new expense.
///
/// Validates the form, runs the simulated submission round trip, and
/// redirects to the expenses view on success. A submission started while an
/// earlier one is still in flight is rejected with an error alert.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let now = match now_local(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };

    let draft = match validate_form(form, now, &state.categories) {
        Ok(draft) => draft,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = state.submissions.submit().await {
        return error.into_alert_response();
    }

    // There is no persistence layer; the accepted draft is acknowledged and
    // dropped. The log line makes that visible when developing.
    tracing::info!(
        "accepted expense submission: {} for {} on {}",
        draft.description,
        draft.amount,
        draft.date.date(),
    );

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn validate_form(
    form: ExpenseForm,
    now: PrimitiveDateTime,
    categories: &CategoryTable,
) -> Result<Record, Error> {
    let amount = Amount::parse(&form.amount)?;

    let date = form.date.unwrap_or(now.date());
    if date > now.date() {
        tracing::warn!("rejected expense submission dated in the future: {date}");
        return Err(Error::FutureDate(date));
    }

    Record::expense(
        "draft",
        amount,
        &form.description,
        &form.category,
        PrimitiveDateTime::new(date, now.time()),
        form.payment_method,
        categories,
    )
}
