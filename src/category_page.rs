//! Defines the route handler for the category grid page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    category::{Category, CategoryTable},
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    record::store::{CategoryTotal, RecordStore},
};

/// The state needed for the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesViewState {
    /// The read-only record snapshot.
    pub records: RecordStore,
    /// The injected category table.
    pub categories: Arc<CategoryTable>,
}

impl FromRef<AppState> for CategoriesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            records: state.records.clone(),
            categories: state.categories.clone(),
        }
    }
}

/// Display the grid of categories with per-category expense statistics.
pub async fn get_categories_page(State(state): State<CategoriesViewState>) -> Response {
    let totals = state.records.category_totals(&state.categories);

    categories_view(&state.categories, &totals).into_response()
}

fn categories_view(categories: &CategoryTable, totals: &[CategoryTotal]) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::CATEGORIES_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full mb-6" {
                h1 class="text-2xl font-semibold tracking-tight" { "Categories" }
                p class="text-gray-600 dark:text-gray-400 mt-1" {
                    "Manage expense categories and track spending patterns"
                }
            }

            section class="w-full grid gap-4 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4" {
                @for total in totals {
                    @if let Some(category) = categories.get(&total.category) {
                        (category_card(category, total))
                    }
                }
            }
        }
    };

    base("Categories", &[], &content)
}

/// A link to the expenses page filtered down to one category.
fn filtered_expenses_url(category_key: &str) -> String {
    serde_urlencoded::to_string([("category", category_key)])
        .inspect_err(|error| {
            tracing::error!("Could not encode category filter {category_key}: {error}");
        })
        .map(|query| format!("{}?{query}", endpoints::EXPENSES_VIEW))
        .unwrap_or_else(|_| endpoints::EXPENSES_VIEW.to_owned())
}

fn category_card(category: &Category, total: &CategoryTotal) -> Markup {
    html! {
        div
            class={(CARD_STYLE) " p-4"}
            data-category-card=(category.key)
        {
            a
                href=(filtered_expenses_url(&category.key))
                class="flex items-center space-x-3 hover:text-blue-700 dark:hover:text-blue-400"
            {
                div class="flex-shrink-0 flex items-center justify-center h-10 w-10 rounded-md bg-blue-100 dark:bg-blue-900/40 text-xl" {
                    (category.icon)
                }
                h2 class="text-base font-semibold" { (category.name) }
            }

            div class="grid grid-cols-2 gap-2 mt-4" {
                div {
                    div class="text-sm text-gray-600 dark:text-gray-400" { "Expenses" }
                    div class="font-medium" data-category-count="true" { (total.count) }
                }
                div {
                    div class="text-sm text-gray-600 dark:text-gray-400" { "Total" }
                    div class="font-medium" data-category-total="true" {
                        (format_currency(total.total))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, response::Response};
    use scraper::{Html, Selector};

    use crate::{category::CategoryTable, record::store::RecordStore};

    use super::{CategoriesViewState, get_categories_page};

    fn sample_state() -> CategoriesViewState {
        let categories = CategoryTable::default();
        let records = RecordStore::with_sample_data(&categories).unwrap();

        CategoriesViewState {
            records,
            categories: Arc::new(categories),
        }
    }

    async fn parse_html(response: Response) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");

        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn categories_page_renders_a_card_per_category() {
        let response = get_categories_page(State(sample_state())).await;

        let html = parse_html(response).await;
        assert!(html.errors.is_empty(), "invalid HTML: {:?}", html.errors);

        let card_selector = Selector::parse("[data-category-card]").unwrap();
        assert_eq!(html.select(&card_selector).count(), 8);
    }

    #[tokio::test]
    async fn food_card_shows_count_and_exact_total() {
        let response = get_categories_page(State(sample_state())).await;

        let html = parse_html(response).await;
        let card_selector = Selector::parse("[data-category-card='food']").unwrap();
        let card = html
            .select(&card_selector)
            .next()
            .expect("food card missing");
        let text = card.text().collect::<String>();

        assert!(text.contains("Food & Dining"));
        // 42.99 + 12.50, summed in minor units.
        assert!(text.contains("₹55.49"), "got card text: {text}");

        let count_selector = Selector::parse("[data-category-count='true']").unwrap();
        let count = card
            .select(&count_selector)
            .next()
            .expect("count missing")
            .text()
            .collect::<String>();
        assert_eq!(count, "2");
    }

    #[tokio::test]
    async fn category_cards_link_to_the_filtered_expense_list() {
        let response = get_categories_page(State(sample_state())).await;

        let html = parse_html(response).await;
        let link_selector =
            Selector::parse("[data-category-card='food'] a[href='/expenses?category=food']")
                .unwrap();

        assert!(html.select(&link_selector).next().is_some());
    }

    #[tokio::test]
    async fn unused_categories_show_zero_totals() {
        let response = get_categories_page(State(sample_state())).await;

        let html = parse_html(response).await;
        let card_selector = Selector::parse("[data-category-card='travel']").unwrap();
        let card = html
            .select(&card_selector)
            .next()
            .expect("travel card missing");
        let text = card.text().collect::<String>();

        assert!(text.contains("₹0.00"), "got card text: {text}");
    }
}
