//! Card components for the dashboard summary row.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, format_currency},
    record::Amount,
};

/// The headline numbers shown at the top of the dashboard.
///
/// All values are computed from the record store when the page is rendered.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardStats {
    /// The summed amount of all expenses.
    pub total_expenses: Amount,
    /// How many expenses there are.
    pub expense_count: usize,
    /// How many categories the table defines.
    pub category_count: usize,
    /// The display name of the category with the highest expense total, if
    /// any expenses exist.
    pub top_category: Option<String>,
    /// How many receipts there are.
    pub receipt_count: usize,
}

/// Renders the four summary stat cards.
pub(super) fn stat_cards_view(stats: &DashboardStats) -> Markup {
    let top_category_note = match &stats.top_category {
        Some(name) => format!("Most spent: {name}"),
        None => "No expenses yet".to_owned(),
    };

    html! {
        section class="w-full grid gap-6 md:grid-cols-2 lg:grid-cols-4 mb-8" {
            (stat_card(
                "Total Expenses",
                &format_currency(stats.total_expenses),
                &format!("Across {} transactions", stats.expense_count),
            ))
            (stat_card(
                "Transactions",
                &stats.expense_count.to_string(),
                "Expenses recorded",
            ))
            (stat_card(
                "Categories",
                &stats.category_count.to_string(),
                &top_category_note,
            ))
            (stat_card(
                "Receipts",
                &stats.receipt_count.to_string(),
                "Documents on file",
            ))
        }
    }
}

fn stat_card(title: &str, value: &str, note: &str) -> Markup {
    html! {
        div class={(CARD_STYLE) " p-4"} data-stat-card=(title) {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            div class="text-2xl font-bold mt-2" data-stat-value="true" { (value) }
            p class="text-xs text-gray-600 dark:text-gray-400 mt-1" { (note) }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::record::Amount;

    use super::{DashboardStats, stat_cards_view};

    fn stats() -> DashboardStats {
        DashboardStats {
            total_expenses: Amount::parse("336.23").unwrap(),
            expense_count: 5,
            category_count: 8,
            top_category: Some("Utilities".to_owned()),
            receipt_count: 5,
        }
    }

    #[test]
    fn renders_all_four_cards() {
        let html = stat_cards_view(&stats()).into_string();

        assert!(html.contains("₹336.23"));
        assert!(html.contains("Most spent: Utilities"));
        for title in ["Total Expenses", "Transactions", "Categories", "Receipts"] {
            assert!(
                html.contains(&format!("data-stat-card=\"{title}\"")),
                "missing card {title}"
            );
        }
    }

    #[test]
    fn renders_placeholder_note_without_expenses() {
        let html = stat_cards_view(&DashboardStats {
            total_expenses: Amount::ZERO,
            expense_count: 0,
            category_count: 8,
            top_category: None,
            receipt_count: 0,
        })
        .into_string();

        assert!(html.contains("No expenses yet"));
        assert!(html.contains("₹0.00"));
    }
}
