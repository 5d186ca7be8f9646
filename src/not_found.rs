//! Defines the template and route handler for the 404 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

fn not_found_view() -> Markup {
    error_view(
        "Page Not Found",
        "404",
        "Sorry, that page does not exist.",
        "Check the address for typos, or head back to the dashboard.",
    )
}

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}
