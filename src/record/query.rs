//! The query engine that computes the visible, ordered subset of records.
//!
//! Both the expenses page and the receipts page are rendered from the output
//! of [visible_records]: a pure function of the record collection, the query
//! state and the current local time. The engine performs no I/O and never
//! mutates its input.

use time::{Date, Month, PrimitiveDateTime};

use super::model::{Record, RecordKind};

/// A lower bound on record dates, evaluated against "now" at query time.
///
/// The bound is inclusive and there is no upper bound, so future-dated
/// records always pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRangePreset {
    /// No date filtering.
    #[default]
    All,
    /// Records dated within the last seven days.
    PastWeek,
    /// Records dated within the last calendar month.
    PastMonth,
    /// Records dated within the last three calendar months.
    PastQuarter,
}

impl DateRangePreset {
    /// The presets in the order the receipts page lists them.
    pub const ALL_PRESETS: [DateRangePreset; 4] = [
        DateRangePreset::All,
        DateRangePreset::PastWeek,
        DateRangePreset::PastMonth,
        DateRangePreset::PastQuarter,
    ];

    /// Parse a query-string value.
    ///
    /// Unrecognized values fail closed to [DateRangePreset::All] rather than
    /// producing an error the user would see.
    pub fn from_query_value(value: &str) -> Self {
        match value {
            "week" => DateRangePreset::PastWeek,
            "month" => DateRangePreset::PastMonth,
            "quarter" => DateRangePreset::PastQuarter,
            _ => DateRangePreset::All,
        }
    }

    /// The value used in query strings and form options.
    pub fn as_query_value(self) -> &'static str {
        match self {
            DateRangePreset::All => "all",
            DateRangePreset::PastWeek => "week",
            DateRangePreset::PastMonth => "month",
            DateRangePreset::PastQuarter => "quarter",
        }
    }

    /// The label shown in the date range select.
    pub fn label(self) -> &'static str {
        match self {
            DateRangePreset::All => "All Time",
            DateRangePreset::PastWeek => "Past Week",
            DateRangePreset::PastMonth => "Past Month",
            DateRangePreset::PastQuarter => "Past 3 Months",
        }
    }

    /// The inclusive lower bound for this preset, or `None` for
    /// [DateRangePreset::All].
    pub fn cutoff(self, now: PrimitiveDateTime) -> Option<PrimitiveDateTime> {
        match self {
            DateRangePreset::All => None,
            DateRangePreset::PastWeek => Some(now - time::Duration::days(7)),
            DateRangePreset::PastMonth => Some(months_back(now, 1)),
            DateRangePreset::PastQuarter => Some(months_back(now, 3)),
        }
    }
}

/// Step `datetime` back by whole calendar months, clamping the day to the
/// length of the target month (e.g. May 31 minus one month is April 30).
fn months_back(datetime: PrimitiveDateTime, months: u32) -> PrimitiveDateTime {
    let date = datetime.date();
    let mut year = date.year();
    let mut month = date.month();

    for _ in 0..months {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    let day = date.day().min(month.length(year));
    let date = Date::from_calendar_date(year, month, day).unwrap_or(date);

    PrimitiveDateTime::new(date, datetime.time())
}

/// The field and direction to order records by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first. The expense page default.
    #[default]
    DateDesc,
    /// Oldest first.
    DateAsc,
    /// Highest amount first.
    AmountDesc,
    /// Lowest amount first.
    AmountAsc,
}

impl SortKey {
    /// The sort keys in the order the expenses page lists them.
    pub const ALL_KEYS: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
    ];

    /// Parse a query-string value. Unrecognized values return `None` so the
    /// caller can apply its default.
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "date-desc" => Some(SortKey::DateDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "amount-desc" => Some(SortKey::AmountDesc),
            "amount-asc" => Some(SortKey::AmountAsc),
            _ => None,
        }
    }

    /// The value used in query strings and form options.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::AmountDesc => "amount-desc",
            SortKey::AmountAsc => "amount-asc",
        }
    }

    /// The label shown in the sort select.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Newest First",
            SortKey::DateAsc => "Oldest First",
            SortKey::AmountDesc => "Highest Amount",
            SortKey::AmountAsc => "Lowest Amount",
        }
    }
}

/// The combination of search term, category filter, date range and sort key
/// that determines a view's visible subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    /// Free-text search term. Empty means "match everything".
    pub search: String,
    /// Category key to filter on. `None` means all categories.
    pub category: Option<String>,
    /// Lower bound on record dates.
    pub date_range: DateRangePreset,
    /// Ordering of the result. `None` preserves the input order.
    pub sort: Option<SortKey>,
}

/// Compute the visible, ordered subset of `records` for `query`.
///
/// Records pass when they match all active predicates: a case-insensitive
/// substring match on the description (and, for receipts, the vendor), an
/// exact category key match, and a date at or after the range cutoff derived
/// from `now`. When a sort key is given the result is ordered by it with a
/// stable sort, so ties keep their original relative order.
pub fn visible_records(
    records: &[Record],
    query: &RecordQuery,
    now: PrimitiveDateTime,
) -> Vec<Record> {
    let needle = query.search.trim().to_lowercase();
    let cutoff = query.date_range.cutoff(now);

    let mut visible: Vec<Record> = records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .filter(|record| {
            query
                .category
                .as_deref()
                .is_none_or(|category| record.category == category)
        })
        .filter(|record| cutoff.is_none_or(|cutoff| record.date >= cutoff))
        .cloned()
        .collect();

    if let Some(sort) = query.sort {
        visible.sort_by(|a, b| match sort {
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::DateAsc => a.date.cmp(&b.date),
            SortKey::AmountDesc => b.amount.cmp(&a.amount),
            SortKey::AmountAsc => a.amount.cmp(&b.amount),
        });
    }

    visible
}

/// Case-insensitive substring match against a record's text fields.
///
/// Expenses match on their description only; receipts match on their title
/// or their vendor.
fn matches_search(record: &Record, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }

    if record.description.to_lowercase().contains(needle_lower) {
        return true;
    }

    match &record.kind {
        RecordKind::Receipt { vendor, .. } => vendor.to_lowercase().contains(needle_lower),
        RecordKind::Expense { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        category::CategoryTable,
        record::model::{Amount, PaymentMethod, Record},
    };

    use super::{DateRangePreset, RecordQuery, SortKey, months_back, visible_records};

    fn expense(
        id: &str,
        amount: &str,
        description: &str,
        category: &str,
        date: time::PrimitiveDateTime,
    ) -> Record {
        Record::expense(
            id,
            Amount::parse(amount).unwrap(),
            description,
            category,
            date,
            PaymentMethod::Credit,
            &CategoryTable::default(),
        )
        .unwrap()
    }

    fn receipt(
        id: &str,
        amount: &str,
        title: &str,
        vendor: &str,
        category: &str,
        date: time::PrimitiveDateTime,
    ) -> Record {
        Record::receipt(
            id,
            Amount::parse(amount).unwrap(),
            title,
            category,
            date,
            vendor,
            false,
            &CategoryTable::default(),
        )
        .unwrap()
    }

    fn sample_expenses() -> Vec<Record> {
        vec![
            expense(
                "exp1",
                "42.99",
                "Weekly Grocery Shopping",
                "food",
                datetime!(2023-05-01 10:30),
            ),
            expense(
                "exp2",
                "29.99",
                "Monthly Netflix Subscription",
                "entertainment",
                datetime!(2023-05-01 14:15),
            ),
            expense(
                "exp3",
                "85.75",
                "New Shoes",
                "shopping",
                datetime!(2023-04-30 15:45),
            ),
            expense(
                "exp4",
                "12.50",
                "Lunch with Colleagues",
                "food",
                datetime!(2023-04-30 12:30),
            ),
            expense(
                "exp5",
                "165.00",
                "Electric Bill - April",
                "utilities",
                datetime!(2023-04-29 9:10),
            ),
        ]
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    const NOW: time::PrimitiveDateTime = datetime!(2023-05-15 12:00);

    #[test]
    fn empty_query_returns_all_records_in_original_order() {
        let records = sample_expenses();

        let got = visible_records(&records, &RecordQuery::default(), NOW);

        assert_eq!(got, records);
    }

    #[test]
    fn search_results_are_sound_and_complete() {
        let records = sample_expenses();
        let query = RecordQuery {
            search: "GROCERY".to_owned(),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        for record in &got {
            assert!(
                record.description.to_lowercase().contains("grocery"),
                "{} should not have matched",
                record.id
            );
        }
        for record in records.iter().filter(|record| !got.contains(record)) {
            assert!(
                !record.description.to_lowercase().contains("grocery"),
                "{} should have matched",
                record.id
            );
        }
        assert_eq!(ids(&got), ["exp1"]);
    }

    #[test]
    fn search_for_no_match_returns_empty_sequence() {
        let records = sample_expenses();
        let query = RecordQuery {
            search: "zzz-no-match".to_owned(),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        assert!(got.is_empty(), "got {:?}, want no records", ids(&got));
    }

    #[test]
    fn category_filter_returns_subset_with_matching_category() {
        let records = sample_expenses();
        let query = RecordQuery {
            category: Some("shopping".to_owned()),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        assert_eq!(ids(&got), ["exp3"]);
        assert_eq!(got[0].description, "New Shoes");

        let unfiltered = visible_records(&records, &RecordQuery::default(), NOW);
        for record in &got {
            assert!(unfiltered.contains(record));
        }
    }

    #[test]
    fn sorts_by_amount_descending() {
        let records = vec![
            expense(
                "e1",
                "42.99",
                "Weekly Grocery Shopping",
                "food",
                datetime!(2023-05-01 0:00),
            ),
            expense(
                "e2",
                "29.99",
                "Monthly Netflix Subscription",
                "entertainment",
                datetime!(2023-05-01 0:00),
            ),
        ];
        let query = RecordQuery {
            sort: Some(SortKey::AmountDesc),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        assert_eq!(ids(&got), ["e1", "e2"]);
    }

    #[test]
    fn sorting_an_already_sorted_result_is_identity() {
        let records = sample_expenses();

        for sort in SortKey::ALL_KEYS {
            let query = RecordQuery {
                sort: Some(sort),
                ..Default::default()
            };
            let once = visible_records(&records, &query, NOW);
            let twice = visible_records(&once, &query, NOW);

            assert_eq!(once, twice, "sorting by {sort:?} twice changed the order");
        }
    }

    #[test]
    fn stable_sort_keeps_original_order_for_equal_keys() {
        let records = vec![
            expense("e1", "10.00", "First", "food", datetime!(2023-05-01 10:00)),
            expense("e2", "20.00", "Second", "food", datetime!(2023-05-01 10:00)),
            expense("e3", "30.00", "Third", "food", datetime!(2023-05-01 10:00)),
        ];
        let query = RecordQuery {
            sort: Some(SortKey::DateDesc),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        assert_eq!(ids(&got), ["e1", "e2", "e3"]);
    }

    #[test]
    fn date_range_results_are_monotonic() {
        let now = datetime!(2023-05-15 12:00);
        let records = vec![
            expense("today", "1.00", "Today", "food", datetime!(2023-05-15 8:00)),
            expense(
                "three_days",
                "1.00",
                "Three days ago",
                "food",
                datetime!(2023-05-12 8:00),
            ),
            expense(
                "two_weeks",
                "1.00",
                "Two weeks ago",
                "food",
                datetime!(2023-05-01 8:00),
            ),
            expense(
                "two_months",
                "1.00",
                "Two months ago",
                "food",
                datetime!(2023-03-15 8:00),
            ),
            expense(
                "last_year",
                "1.00",
                "Last year",
                "food",
                datetime!(2022-05-15 8:00),
            ),
        ];

        let results: Vec<Vec<Record>> = [
            DateRangePreset::PastWeek,
            DateRangePreset::PastMonth,
            DateRangePreset::PastQuarter,
            DateRangePreset::All,
        ]
        .into_iter()
        .map(|date_range| {
            visible_records(
                &records,
                &RecordQuery {
                    date_range,
                    ..Default::default()
                },
                now,
            )
        })
        .collect();

        for window in results.windows(2) {
            for record in &window[0] {
                assert!(
                    window[1].contains(record),
                    "{} in the narrower range but not the wider one",
                    record.id
                );
            }
        }

        assert_eq!(ids(&results[0]), ["today", "three_days"]);
        assert_eq!(ids(&results[1]), ["today", "three_days", "two_weeks"]);
        assert_eq!(
            ids(&results[2]),
            ["today", "three_days", "two_weeks", "two_months"]
        );
        assert_eq!(results[3].len(), records.len());
    }

    #[test]
    fn date_range_lower_bound_is_inclusive() {
        let now = datetime!(2023-05-15 12:00);
        let records = vec![
            expense(
                "on_cutoff",
                "1.00",
                "Exactly a week ago",
                "food",
                datetime!(2023-05-08 12:00),
            ),
            expense(
                "before_cutoff",
                "1.00",
                "Just before",
                "food",
                datetime!(2023-05-08 11:59),
            ),
        ];
        let query = RecordQuery {
            date_range: DateRangePreset::PastWeek,
            ..Default::default()
        };

        let got = visible_records(&records, &query, now);

        assert_eq!(ids(&got), ["on_cutoff"]);
    }

    #[test]
    fn future_dated_records_pass_every_range() {
        let records = vec![expense(
            "future",
            "1.00",
            "Prepaid",
            "food",
            datetime!(2024-01-01 0:00),
        )];

        for date_range in DateRangePreset::ALL_PRESETS {
            let query = RecordQuery {
                date_range,
                ..Default::default()
            };
            let got = visible_records(&records, &query, NOW);

            assert_eq!(got.len(), 1, "future record excluded from {date_range:?}");
        }
    }

    #[test]
    fn past_month_is_calendar_aware_not_thirty_days() {
        // May 31 minus one month clamps to April 30.
        assert_eq!(
            months_back(datetime!(2023-05-31 12:00), 1),
            datetime!(2023-04-30 12:00)
        );
        // Stepping over a year boundary.
        assert_eq!(
            months_back(datetime!(2023-02-15 8:00), 3),
            datetime!(2022-11-15 8:00)
        );
        // Leap day handling.
        assert_eq!(
            months_back(datetime!(2024-03-31 0:00), 1),
            datetime!(2024-02-29 0:00)
        );
    }

    #[test]
    fn receipts_match_on_title_or_vendor() {
        let records = vec![
            receipt(
                "rec1",
                "1250.75",
                "Grocery Shopping",
                "SuperMart",
                "food",
                datetime!(2023-05-10 0:00),
            ),
            receipt(
                "rec5",
                "320.00",
                "Taxi Fare",
                "Uber",
                "transport",
                datetime!(2023-04-18 0:00),
            ),
        ];
        let query = RecordQuery {
            search: "uber".to_owned(),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        assert_eq!(ids(&got), ["rec5"]);
    }

    #[test]
    fn expenses_do_not_match_on_vendor() {
        // An expense and a receipt with the same text in different fields:
        // the receipt matches through its vendor, the expense has no vendor.
        let records = vec![
            expense(
                "exp",
                "10.00",
                "Weekly shop",
                "food",
                datetime!(2023-05-01 0:00),
            ),
            receipt(
                "rec",
                "10.00",
                "Weekly shop",
                "SuperMart",
                "food",
                datetime!(2023-05-01 0:00),
            ),
        ];
        let query = RecordQuery {
            search: "supermart".to_owned(),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        assert_eq!(ids(&got), ["rec"]);
    }

    #[test]
    fn unknown_range_value_fails_closed_to_all() {
        assert_eq!(
            DateRangePreset::from_query_value("fortnight"),
            DateRangePreset::All
        );
        assert_eq!(DateRangePreset::from_query_value(""), DateRangePreset::All);
        assert_eq!(
            DateRangePreset::from_query_value("week"),
            DateRangePreset::PastWeek
        );
    }

    #[test]
    fn unknown_sort_value_parses_to_none() {
        assert_eq!(SortKey::from_query_value("amount"), None);
        assert_eq!(
            SortKey::from_query_value("amount-asc"),
            Some(SortKey::AmountAsc)
        );
    }

    #[test]
    fn combined_predicates_are_intersected() {
        let records = sample_expenses();
        let query = RecordQuery {
            search: "l".to_owned(),
            category: Some("food".to_owned()),
            sort: Some(SortKey::AmountAsc),
            ..Default::default()
        };

        let got = visible_records(&records, &query, NOW);

        // Both food expenses contain an "l"; lowest amount first.
        assert_eq!(ids(&got), ["exp4", "exp1"]);
    }

    #[test]
    fn input_collection_is_not_mutated() {
        let records = sample_expenses();
        let before = records.clone();
        let query = RecordQuery {
            sort: Some(SortKey::AmountAsc),
            ..Default::default()
        };

        let _ = visible_records(&records, &query, NOW);

        assert_eq!(records, before);
    }
}
