//! The in-memory record store and its aggregate queries.
//!
//! The store holds an immutable snapshot of records behind an `Arc`, seeded
//! once at startup. Page handlers read from it concurrently without locking;
//! nothing mutates it after construction.

use std::sync::Arc;

use time::{Month, macros::datetime};

use crate::{
    Error,
    category::CategoryTable,
    record::model::{Amount, PaymentMethod, Record},
};

/// Read access to the application's records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<Vec<Record>>,
}

/// Per-category expense statistics for the category grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// The category key.
    pub category: String,
    /// How many expenses belong to the category.
    pub count: usize,
    /// The summed amount of those expenses.
    pub total: Amount,
}

/// Total expense amount for one calendar month, for the reports charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// A short label such as "Apr 2023".
    pub label: String,
    /// The summed expense amount for the month.
    pub total: Amount,
}

impl RecordStore {
    /// Create a store over an explicit record collection.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Create a store seeded with the sample data set.
    ///
    /// # Errors
    /// Returns an error if a sample record does not validate against
    /// `categories`, e.g. when a custom table is missing one of the standard
    /// category keys.
    pub fn with_sample_data(categories: &CategoryTable) -> Result<Self, Error> {
        Ok(Self::new(sample_records(categories)?))
    }

    /// All records, in seed order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The expense records, in seed order.
    pub fn expenses(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.is_expense())
            .cloned()
            .collect()
    }

    /// The receipt records, in seed order.
    pub fn receipts(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.is_receipt())
            .cloned()
            .collect()
    }

    /// The summed amount of all expenses.
    pub fn expense_total(&self) -> Amount {
        Amount::total(
            self.records
                .iter()
                .filter(|record| record.is_expense())
                .map(|record| record.amount),
        )
    }

    /// Expense count and total per category, in the table's display order.
    ///
    /// Every category in the table gets an entry, including ones with no
    /// expenses yet. Expenses whose key is missing from the table are not
    /// represented here; the list views still render them individually.
    pub fn category_totals(&self, categories: &CategoryTable) -> Vec<CategoryTotal> {
        categories
            .categories()
            .iter()
            .map(|category| {
                let expenses: Vec<&Record> = self
                    .records
                    .iter()
                    .filter(|record| record.is_expense() && record.category == category.key)
                    .collect();

                CategoryTotal {
                    category: category.key.clone(),
                    count: expenses.len(),
                    total: Amount::total(expenses.iter().map(|record| record.amount)),
                }
            })
            .collect()
    }

    /// Total expense amount per calendar month, oldest month first.
    pub fn monthly_expense_totals(&self) -> Vec<MonthlyTotal> {
        let mut months: Vec<(i32, Month)> = self
            .records
            .iter()
            .filter(|record| record.is_expense())
            .map(|record| (record.date.year(), record.date.month()))
            .collect();
        months.sort_by_key(|(year, month)| (*year, *month as u8));
        months.dedup();

        months
            .into_iter()
            .map(|(year, month)| {
                let total = Amount::total(
                    self.records
                        .iter()
                        .filter(|record| {
                            record.is_expense()
                                && record.date.year() == year
                                && record.date.month() == month
                        })
                        .map(|record| record.amount),
                );

                MonthlyTotal {
                    label: format!("{} {year}", month_abbreviation(month)),
                    total,
                }
            })
            .collect()
    }
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// The sample data set: five expenses and five receipts.
fn sample_records(categories: &CategoryTable) -> Result<Vec<Record>, Error> {
    let amount = Amount::parse;

    Ok(vec![
        Record::expense(
            "exp1",
            amount("42.99")?,
            "Weekly Grocery Shopping",
            "food",
            datetime!(2023-05-01 10:30),
            PaymentMethod::Credit,
            categories,
        )?,
        Record::expense(
            "exp2",
            amount("29.99")?,
            "Monthly Netflix Subscription",
            "entertainment",
            datetime!(2023-05-01 14:15),
            PaymentMethod::Credit,
            categories,
        )?,
        Record::expense(
            "exp3",
            amount("85.75")?,
            "New Shoes",
            "shopping",
            datetime!(2023-04-30 15:45),
            PaymentMethod::Debit,
            categories,
        )?,
        Record::expense(
            "exp4",
            amount("12.50")?,
            "Lunch with Colleagues",
            "food",
            datetime!(2023-04-30 12:30),
            PaymentMethod::Cash,
            categories,
        )?,
        Record::expense(
            "exp5",
            amount("165.00")?,
            "Electric Bill - April",
            "utilities",
            datetime!(2023-04-29 9:10),
            PaymentMethod::Bank,
            categories,
        )?,
        Record::receipt(
            "rec1",
            amount("1250.75")?,
            "Grocery Shopping",
            "food",
            datetime!(2023-05-10 0:00),
            "SuperMart",
            true,
            categories,
        )?,
        Record::receipt(
            "rec2",
            amount("499.00")?,
            "Phone Bill - May",
            "utilities",
            datetime!(2023-05-05 0:00),
            "Airtel",
            true,
            categories,
        )?,
        Record::receipt(
            "rec3",
            amount("650.00")?,
            "Movie Tickets",
            "entertainment",
            datetime!(2023-04-28 0:00),
            "PVR Cinemas",
            false,
            categories,
        )?,
        Record::receipt(
            "rec4",
            amount("850.50")?,
            "Office Supplies",
            "shopping",
            datetime!(2023-04-22 0:00),
            "Staples",
            true,
            categories,
        )?,
        Record::receipt(
            "rec5",
            amount("320.00")?,
            "Taxi Fare",
            "transport",
            datetime!(2023-04-18 0:00),
            "Uber",
            false,
            categories,
        )?,
    ])
}
