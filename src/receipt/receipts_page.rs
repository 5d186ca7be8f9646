//! Defines the route handler for the page that displays receipts.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::CategoryTable,
    record::{DateRangePreset, RecordQuery, store::RecordStore, visible_records},
    timezone::now_local,
};

use super::view::receipts_view;

/// The state needed for the receipts page.
#[derive(Debug, Clone)]
pub struct ReceiptsViewState {
    /// The read-only record snapshot.
    pub records: RecordStore,
    /// The injected category table.
    pub categories: Arc<CategoryTable>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for ReceiptsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            categories: state.categories.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The raw query parameters accepted by the receipts page.
///
/// All fields are optional and malformed values are defaulted. An
/// unrecognized `range` value behaves as "all", never an error.
#[derive(Debug, Default, Deserialize)]
pub struct ReceiptsQuery {
    /// Free-text search term, matched against title and vendor.
    pub q: Option<String>,
    /// Category key, or empty for all categories.
    pub category: Option<String>,
    /// Date range query value, e.g. "week".
    pub range: Option<String>,
}

fn normalize_query(query: ReceiptsQuery) -> RecordQuery {
    let category = query
        .category
        .filter(|category| !category.is_empty() && category != "all");
    let date_range = query
        .range
        .as_deref()
        .map(DateRangePreset::from_query_value)
        .unwrap_or_default();

    RecordQuery {
        search: query.q.unwrap_or_default(),
        category,
        date_range,
        sort: None,
    }
}

/// Render the receipts browser with the active filters applied.
pub async fn get_receipts_page(
    State(state): State<ReceiptsViewState>,
    Query(query_params): Query<ReceiptsQuery>,
) -> Result<Response, Error> {
    let now = now_local(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get local time: {error}"))?;

    let query = normalize_query(query_params);
    let receipts = visible_records(&state.records.receipts(), &query, now);

    Ok(receipts_view(&receipts, &query, &state.categories).into_response())
}
