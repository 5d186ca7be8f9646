//! Alert messages swapped into the page's out-of-band alert container.
//!
//! Form endpoints respond with an alert partial on validation failure. The
//! base layout reserves a fixed `#alert-container` element; the markup here
//! targets it with an HTMX out-of-band swap.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A success or error message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A completed action, e.g. a submitted expense.
    Success {
        /// Short headline.
        message: String,
        /// Supporting detail text.
        details: String,
    },
    /// A failed action, e.g. a rejected form.
    Error {
        /// Short headline.
        message: String,
        /// Supporting detail text.
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Alert::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert markup for the out-of-band container.
    pub fn render(&self) -> Markup {
        let (message, details, accent_classes) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-green-900/40 dark:text-green-200",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-red-900/40 dark:text-red-200",
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class={"rounded-lg border p-4 shadow-lg " (accent_classes)}
                    role="alert"
                    data-alert=(match self {
                        Alert::Success { .. } => "success",
                        Alert::Error { .. } => "error",
                    })
                {
                    p class="font-semibold" { (message) }
                    @if !details.is_empty() {
                        p class="mt-1 text-sm" { (details) }
                    }
                }
            }
        }
    }

    /// Turn the alert into an HTTP response with the given status.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.render()).into_response()
    }
}
