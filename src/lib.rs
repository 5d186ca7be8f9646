//! Spendwell is a web app for tracking your personal expenses.
//!
//! This library provides a server that directly serves HTML pages: a
//! dashboard with summary cards, an expense list with filtering and sorting,
//! a receipts browser, a category grid, and a reports page with charts.
//!
//! All record data is an in-memory sample snapshot seeded at startup. There
//! is no database and no authentication.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use time::Date;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod category_page;
mod dashboard;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod receipt;
mod record;
mod report;
mod routing;
mod submission;
mod timezone;

pub use app_state::AppState;
pub use category::CategoryTable;
pub use record::store::RecordStore;
pub use routing::build_router;
pub use submission::SubmissionService;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount string from the expense form could not be parsed as a
    /// non-negative currency value with at most two decimal places.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An empty string was used as an expense description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The category key used to create a record is not present in the
    /// category table.
    ///
    /// Record creation validates category keys up front. Records already in
    /// the collection with a key that has since disappeared from the table
    /// are still rendered, with fallback styling.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// A date in the future was used to create an expense.
    ///
    /// Expenses record money that has already been spent, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A submission was started while an earlier one was still in flight.
    #[error("an expense submission is already in progress")]
    SubmissionPending,

    /// An error occurred while getting the local timezone from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(amount) => Alert::error(
                "Invalid amount",
                &format!(
                    "\"{amount}\" is not a valid amount. Enter a non-negative value with at \
                    most two decimal places, e.g. 42.99."
                ),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::EmptyDescription => Alert::error(
                "Missing description",
                "Enter a short description of what the expense was for.",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::UnknownCategory(category) => Alert::error(
                "Invalid category",
                &format!("Could not find a category with the key \"{category}\"."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::FutureDate(date) => Alert::error(
                "Invalid expense date",
                &format!("{date} is a date in the future, which is not allowed."),
            )
            .into_response(StatusCode::BAD_REQUEST),
            Error::SubmissionPending => Alert::error(
                "Submission in progress",
                "An expense submission is already in progress. \
                Wait for it to finish before submitting again.",
            )
            .into_response(StatusCode::CONFLICT),
            Error::InvalidTimezone(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
            _ => Alert::error(
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
