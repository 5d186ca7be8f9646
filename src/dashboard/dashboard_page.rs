//! Defines the route handler for the dashboard page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::CategoryTable,
    endpoints,
    expense::expense_list,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    record::{Record, RecordQuery, SortKey, store::RecordStore, visible_records},
    timezone::now_local,
};

use super::cards::{DashboardStats, stat_cards_view};

/// How many expenses the recent expenses section shows.
const RECENT_EXPENSES_LIMIT: usize = 4;

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardViewState {
    /// The read-only record snapshot.
    pub records: RecordStore,
    /// The injected category table.
    pub categories: Arc<CategoryTable>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            categories: state.categories.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the user's expenses.
pub async fn get_dashboard_page(
    State(state): State<DashboardViewState>,
) -> Result<Response, Error> {
    let now = now_local(&state.local_timezone)
        .inspect_err(|error| tracing::error!("could not get local time: {error}"))?;

    let stats = build_stats(&state.records, &state.categories);

    let recent_query = RecordQuery {
        sort: Some(SortKey::DateDesc),
        ..Default::default()
    };
    let mut recent = visible_records(&state.records.expenses(), &recent_query, now);
    recent.truncate(RECENT_EXPENSES_LIMIT);

    Ok(dashboard_view(&stats, &recent, &state.categories).into_response())
}

fn build_stats(records: &RecordStore, categories: &CategoryTable) -> DashboardStats {
    let top_category = records
        .category_totals(categories)
        .into_iter()
        .filter(|total| total.count > 0)
        .max_by_key(|total| total.total)
        .map(|total| categories.display_name(&total.category).to_owned());

    DashboardStats {
        total_expenses: records.expense_total(),
        expense_count: records.expenses().len(),
        category_count: categories.categories().len(),
        top_category,
        receipt_count: records.receipts().len(),
    }
}

fn dashboard_view(
    stats: &DashboardStats,
    recent_expenses: &[Record],
    categories: &CategoryTable,
) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full mb-6" {
                h1 class="text-2xl font-semibold tracking-tight" { "Dashboard" }
                p class="text-gray-600 dark:text-gray-400 mt-1" {
                    "Overview of your expenses and financial activity"
                }
            }

            (stat_cards_view(stats))

            section class="w-full" id="recent-expenses" {
                div class="flex items-center justify-between mb-4" {
                    h2 class="text-xl font-semibold" { "Recent Expenses" }
                    a href=(endpoints::EXPENSES_VIEW) class=(LINK_STYLE) { "See all" }
                }

                div class="space-y-4" {
                    (expense_list(recent_expenses, categories))
                }
            }
        }
    };

    base("Dashboard", &[], &content)
}
