//! Defines the route handler for the page that displays expenses.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::CategoryTable,
    record::{RecordQuery, SortKey, store::RecordStore, visible_records},
    timezone::now_local,
};

use super::view::expenses_view;

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesViewState {
    /// The read-only record snapshot.
    pub records: RecordStore,
    /// The injected category table.
    pub categories: Arc<CategoryTable>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            categories: state.categories.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The raw query parameters accepted by the expenses page.
///
/// All fields are optional; [normalize_query] applies the defaults. Malformed
/// values are defaulted rather than rejected, so a stale or hand-edited URL
/// still renders the page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// Free-text search term.
    pub q: Option<String>,
    /// Category key, or empty/"all" for all categories.
    pub category: Option<String>,
    /// Sort key query value, e.g. "amount-desc".
    pub sort: Option<String>,
}

fn normalize_query(query: ExpensesQuery) -> RecordQuery {
    let category = query
        .category
        .filter(|category| !category.is_empty() && category != "all");
    let sort = query
        .sort
        .as_deref()
        .and_then(SortKey::from_query_value)
        .unwrap_or_default();

    RecordQuery {
        search: query.q.unwrap_or_default(),
        category,
        sort: Some(sort),
        ..Default::default()
    }
}

/// Render an overview of the user's expenses with the active filters applied.
pub async fn get_expenses_page(
    State(state): State<ExpensesViewState>,
    Query(query_params): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let now = now_local(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get local time: {error}"))?;

    let query = normalize_query(query_params);
    let expenses = visible_records(&state.records.expenses(), &query, now);

    Ok(expenses_view(&expenses, &query, &state.categories).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        response::Response,
    };
    use scraper::{Html, Selector};

    use crate::{
        category::CategoryTable,
        record::{DateRangePreset, RecordQuery, SortKey, store::RecordStore},
    };

    use super::{ExpensesQuery, ExpensesViewState, get_expenses_page, normalize_query};

    fn sample_state() -> ExpensesViewState {
        let categories = CategoryTable::default();
        let records = RecordStore::with_sample_data(&categories).unwrap();

        ExpensesViewState {
            records,
            categories: Arc::new(categories),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    fn row_ids(html: &Html) -> Vec<String> {
        let row_selector = Selector::parse("[data-expense-row='true']").unwrap();
        html.select(&row_selector)
            .map(|row| row.attr("data-record-id").unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn normalize_query_applies_defaults() {
        let got = normalize_query(ExpensesQuery::default());

        assert_eq!(
            got,
            RecordQuery {
                search: String::new(),
                category: None,
                date_range: DateRangePreset::All,
                sort: Some(SortKey::DateDesc),
            }
        );
    }

    #[test]
    fn normalize_query_treats_all_and_empty_category_as_no_filter() {
        for sentinel in ["", "all"] {
            let got = normalize_query(ExpensesQuery {
                category: Some(sentinel.to_owned()),
                ..Default::default()
            });

            assert_eq!(got.category, None, "category {sentinel:?} should clear");
        }
    }

    #[test]
    fn normalize_query_defaults_unknown_sort_value() {
        let got = normalize_query(ExpensesQuery {
            sort: Some("sideways".to_owned()),
            ..Default::default()
        });

        assert_eq!(got.sort, Some(SortKey::DateDesc));
    }

    #[tokio::test]
    async fn expenses_page_lists_all_expenses_newest_first() {
        let response = get_expenses_page(
            State(sample_state()),
            Query(ExpensesQuery::default()),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_eq!(row_ids(&html), ["exp2", "exp1", "exp3", "exp4", "exp5"]);
    }

    #[tokio::test]
    async fn expenses_page_filters_by_search_query() {
        let response = get_expenses_page(
            State(sample_state()),
            Query(ExpensesQuery {
                q: Some("grocery".to_owned()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_eq!(row_ids(&html), ["exp1"]);
    }

    #[tokio::test]
    async fn expenses_page_sorts_by_amount() {
        let response = get_expenses_page(
            State(sample_state()),
            Query(ExpensesQuery {
                sort: Some("amount-desc".to_owned()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_eq!(row_ids(&html), ["exp5", "exp3", "exp1", "exp2", "exp4"]);
    }

    #[tokio::test]
    async fn expenses_page_shows_empty_state_when_nothing_matches() {
        let response = get_expenses_page(
            State(sample_state()),
            Query(ExpensesQuery {
                q: Some("zzz-no-match".to_owned()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert!(row_ids(&html).is_empty());

        let empty_selector = Selector::parse("[data-empty-state='true']").unwrap();
        let empty_state = html
            .select(&empty_selector)
            .next()
            .expect("No empty-state element found");
        let text = empty_state.text().collect::<String>();
        assert!(text.contains("No expenses found"));
        assert!(text.contains("Try changing your search query or filters"));
    }

    #[tokio::test]
    async fn expenses_page_renders_category_badge_and_payment_method() {
        let response = get_expenses_page(
            State(sample_state()),
            Query(ExpensesQuery {
                q: Some("electric".to_owned()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse("[data-expense-row='true']").unwrap();
        let row = html.select(&row_selector).next().expect("No expense row");
        let text = row.text().collect::<String>();

        assert!(text.contains("₹165.00"), "missing amount in {text:?}");
        assert!(text.contains("Utilities"), "missing category in {text:?}");
        assert!(text.contains("Bank Transfer"), "missing payment method in {text:?}");
        assert!(text.contains("Apr 29, 2023"), "missing date in {text:?}");
    }
}
