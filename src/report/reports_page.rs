//! Defines the route handler for the reports page.

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
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    record::store::RecordStore,
};

use super::charts::{
    ReportChart, category_distribution_chart, charts_script, charts_view,
    monthly_breakdown_chart, spending_trend_chart,
};

/// The state needed for the reports page.
#[derive(Debug, Clone)]
pub struct ReportsViewState {
    /// The read-only record snapshot.
    pub records: RecordStore,
    /// The injected category table.
    pub categories: Arc<CategoryTable>,
}

impl FromRef<AppState> for ReportsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// Display spending charts built from the expense records.
pub async fn get_reports_page(State(state): State<ReportsViewState>) -> Response {
    let monthly_totals = state.records.monthly_expense_totals();
    let category_totals = state.records.category_totals(&state.categories);

    let charts = [
        ReportChart {
            id: "spending-trend-chart",
            options: spending_trend_chart(&monthly_totals).to_string(),
        },
        ReportChart {
            id: "monthly-breakdown-chart",
            options: monthly_breakdown_chart(&monthly_totals).to_string(),
        },
        ReportChart {
            id: "category-distribution-chart",
            options: category_distribution_chart(&category_totals, &state.categories).to_string(),
        },
    ];

    reports_view(&charts).into_response()
}

fn reports_view(charts: &[ReportChart]) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::REPORTS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full mb-6" {
                h1 class="text-2xl font-semibold tracking-tight" { "Expense Reports" }
                p class="text-gray-600 dark:text-gray-400 mt-1" {
                    "Visualize your spending patterns"
                }
            }

            (charts_view(charts))

            div class="w-full text-sm text-gray-600 dark:text-gray-400 space-y-1" {
                p { "Trend analysis shows your spending patterns over time." }
                p { "Category distribution shows where your money is going." }
            }
        }
    };

    let head_elements = [
        HeadElement::ScriptLink("/static/echarts-5.4.3-min.js".to_owned()),
        charts_script(charts),
    ];

    base("Reports", &head_elements, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, response::Response};
    use scraper::{Html, Selector};

    use crate::{category::CategoryTable, record::store::RecordStore};

    use super::{ReportsViewState, get_reports_page};

    fn sample_state() -> ReportsViewState {
        let categories = CategoryTable::default();
        let records = RecordStore::with_sample_data(&categories).unwrap();

        ReportsViewState {
            records,
            categories: Arc::new(categories),
        }
    }

    async fn page_html(response: Response) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");

        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn reports_page_renders_three_chart_containers() {
        let response = get_reports_page(State(sample_state())).await;

        let html = page_html(response).await;
        assert!(html.errors.is_empty(), "invalid HTML: {:?}", html.errors);

        for id in [
            "spending-trend-chart",
            "monthly-breakdown-chart",
            "category-distribution-chart",
        ] {
            let selector = Selector::parse(&format!("div#{id}")).unwrap();
            assert!(
                html.select(&selector).next().is_some(),
                "chart container {id} missing"
            );
        }
    }

    #[tokio::test]
    async fn reports_page_embeds_chart_init_script() {
        let response = get_reports_page(State(sample_state())).await;

        let html = page_html(response).await;
        let script_selector = Selector::parse("script").unwrap();
        let scripts: String = html
            .select(&script_selector)
            .map(|script| script.text().collect::<String>())
            .collect();

        assert!(scripts.contains("echarts.init"));
        assert!(scripts.contains("spending-trend-chart"));
    }
}
