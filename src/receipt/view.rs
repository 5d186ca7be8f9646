//! Maud views for the receipts page.

use maud::{Markup, html};

use crate::{
    category::CategoryTable,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base, format_currency, format_date,
    },
    navigation::NavBar,
    record::{DateRangePreset, Record, RecordQuery},
};

/// The full receipts page: header, filter bar and receipt list.
pub(super) fn receipts_view(
    receipts: &[Record],
    query: &RecordQuery,
    categories: &CategoryTable,
) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::RECEIPTS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full mb-6" {
                h1 class="text-2xl font-semibold tracking-tight" { "Receipts" }
                p class="text-gray-600 dark:text-gray-400 mt-1" {
                    "View and manage your expense receipts and invoices"
                }
            }

            (filter_controls(query, categories))

            section class="w-full mt-6" {
                (receipt_list(receipts, categories))
            }
        }
    };

    base("Receipts", &[], &content)
}

/// The search, category and date-range controls as a GET form over the same
/// page.
fn filter_controls(query: &RecordQuery, categories: &CategoryTable) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::RECEIPTS_VIEW)
            class="w-full flex flex-col sm:flex-row sm:items-end gap-3"
        {
            div class="flex-1" {
                label for="q" class="sr-only" { "Search receipts" }
                input
                    id="q"
                    type="search"
                    name="q"
                    placeholder="Search receipts..."
                    value=(query.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div {
                label for="category" class="sr-only" { "Category" }
                select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE) {
                    option value="" selected[query.category.is_none()] { "All Categories" }
                    @for category in categories.categories() {
                        option
                            value=(category.key)
                            selected[query.category.as_deref() == Some(category.key.as_str())]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div {
                label for="range" class="sr-only" { "Date Range" }
                select id="range" name="range" class=(FORM_TEXT_INPUT_STYLE) {
                    @for preset in DateRangePreset::ALL_PRESETS {
                        option
                            value=(preset.as_query_value())
                            selected[preset == query.date_range]
                        {
                            (preset.label())
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    }
}

/// The receipt rows, or the empty state when nothing matches.
fn receipt_list(receipts: &[Record], categories: &CategoryTable) -> Markup {
    if receipts.is_empty() {
        return empty_state();
    }

    html! {
        div class="divide-y divide-gray-200 dark:divide-gray-700 rounded-lg border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800" {
            @for receipt in receipts {
                (receipt_row(receipt, categories))
            }
        }
    }
}

fn receipt_row(receipt: &Record, categories: &CategoryTable) -> Markup {
    html! {
        div
            class="p-4 hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors"
            data-receipt-row="true"
            data-record-id=(receipt.id)
        {
            div class="flex items-center justify-between" {
                div {
                    div class="font-medium" { (receipt.description) }
                    @if let Some(vendor) = receipt.vendor() {
                        div class="text-sm text-gray-600 dark:text-gray-400" { (vendor) }
                    }

                    div class="flex items-center gap-2 mt-1" {
                        span
                            class={(CATEGORY_BADGE_STYLE) " " (categories.badge_classes(&receipt.category))}
                        {
                            (categories.display_name(&receipt.category))
                        }
                        span class="text-xs text-gray-600 dark:text-gray-400" {
                            (format_date(receipt.date.date()))
                        }
                    }
                }

                div class="text-right" {
                    div class="font-medium" data-amount="true" {
                        (format_currency(receipt.amount))
                    }
                    @if receipt.has_attachment() {
                        a
                            href="#"
                            class="text-xs text-blue-600 hover:text-blue-500 dark:text-blue-500"
                            data-attachment="true"
                        {
                            "Download receipt"
                        }
                    }
                }
            }
        }
    }
}

fn empty_state() -> Markup {
    html! {
        div class="text-center py-12" data-empty-state="true" {
            h3 class="text-lg font-medium" { "No receipts found" }
            p class="text-gray-600 dark:text-gray-400 mt-1" {
                "Try changing your search query or filters"
            }
        }
    }
}
