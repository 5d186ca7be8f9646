//! Maud views for the expenses page.

use maud::{Markup, html};

use crate::{
    category::CategoryTable,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, format_currency, format_date, format_time_of_day,
    },
    navigation::NavBar,
    record::{Record, RecordQuery, SortKey},
};

/// The full expenses page: header, filter bar and expense list.
pub(super) fn expenses_view(
    expenses: &[Record],
    query: &RecordQuery,
    categories: &CategoryTable,
) -> Markup {
    let content = html! {
        (NavBar::new(endpoints::EXPENSES_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full flex flex-col sm:flex-row sm:items-center justify-between gap-4 mb-6" {
                div {
                    h1 class="text-2xl font-semibold tracking-tight" { "Expenses" }
                    p class="text-gray-600 dark:text-gray-400 mt-1" {
                        "Manage and track all your expenses"
                    }
                }

                a
                    href=(endpoints::NEW_EXPENSE_VIEW)
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "+ Add Expense"
                }
            }

            (filter_controls(query, categories))

            section class="w-full mt-6 space-y-4" {
                (expense_list(expenses, categories))
            }
        }
    };

    base("Expenses", &[], &content)
}

/// The search, category and sort controls as a GET form over the same page.
fn filter_controls(query: &RecordQuery, categories: &CategoryTable) -> Markup {
    let selected_sort = query.sort.unwrap_or_default();

    html! {
        form
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            class="w-full flex flex-col sm:flex-row sm:items-end gap-3"
        {
            div class="flex-1" {
                label for="q" class="sr-only" { "Search expenses" }
                input
                    id="q"
                    type="search"
                    name="q"
                    placeholder="Search expenses..."
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
                label for="sort" class="sr-only" { "Sort by" }
                select id="sort" name="sort" class=(FORM_TEXT_INPUT_STYLE) {
                    @for sort in SortKey::ALL_KEYS {
                        option value=(sort.as_query_value()) selected[sort == selected_sort] {
                            (sort.label())
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    }
}

/// The expense cards, or the empty state when nothing matches.
///
/// Also used by the dashboard's recent expenses section.
pub(crate) fn expense_list(expenses: &[Record], categories: &CategoryTable) -> Markup {
    if expenses.is_empty() {
        return empty_state();
    }

    html! {
        @for expense in expenses {
            (expense_card(expense, categories))
        }
    }
}

fn expense_card(expense: &Record, categories: &CategoryTable) -> Markup {
    html! {
        article
            class={(CARD_STYLE) " overflow-hidden"}
            data-expense-row="true"
            data-record-id=(expense.id)
        {
            div class="flex flex-col md:flex-row md:items-center" {
                div class="p-4 md:p-5 flex-1" {
                    div class="flex flex-col md:flex-row md:items-center gap-2 md:gap-4" {
                        div class="font-medium text-xl" data-amount="true" {
                            (format_currency(expense.amount))
                        }

                        div class="flex-1 min-w-0" {
                            h3 class="font-medium truncate" { (expense.description) }

                            div class="flex flex-wrap items-center gap-2 mt-1 text-sm text-gray-600 dark:text-gray-400" {
                                span
                                    class={(CATEGORY_BADGE_STYLE) " " (categories.badge_classes(&expense.category))}
                                {
                                    (categories.display_name(&expense.category))
                                }

                                @if let Some(payment_method) = expense.payment_method() {
                                    span class="flex items-center" {
                                        span class="mr-1" { (payment_method.icon()) }
                                        (payment_method.display_name())
                                    }
                                }
                            }
                        }
                    }
                }

                div class="flex items-center p-3 px-4 md:px-5 border-t md:border-t-0 md:border-l border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-900/40" {
                    div class="text-sm" {
                        div class="font-medium" { (format_date(expense.date.date())) }
                        div class="text-gray-600 dark:text-gray-400" {
                            (format_time_of_day(expense.date.time()))
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
            h3 class="text-lg font-medium" { "No expenses found" }
            p class="text-gray-600 dark:text-gray-400 mt-1" {
                "Try changing your search query or filters"
            }
        }
    }
}
