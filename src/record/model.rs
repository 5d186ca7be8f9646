//! Defines the core data models for expenses and receipts.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{Error, category::CategoryTable};

/// A monetary value stored as a whole number of minor units (paise).
///
/// Storing integers instead of floats keeps aggregation exact: summing the
/// dashboard and per-category totals never accumulates rounding drift.
/// Values are non-negative by construction and always display with two
/// fraction digits, e.g. `4299` renders as `42.99`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Amount(i64);

impl Amount {
    /// Zero rupees.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a count of minor units.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `minor_units` is negative.
    pub fn from_minor_units(minor_units: i64) -> Result<Self, Error> {
        if minor_units < 0 {
            Err(Error::InvalidAmount(minor_units.to_string()))
        } else {
            Ok(Self(minor_units))
        }
    }

    /// Parse a user-entered amount string such as `"42.99"`, `"165"` or
    /// `"12.5"`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the string is empty, negative, has
    /// more than two fraction digits, or contains anything other than digits
    /// and a single decimal point.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidAmount(input.to_owned());
        let text = input.trim();

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        if fraction.len() > 2 || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let rupees: i64 = whole.parse().map_err(|_| invalid())?;
        let paise: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        rupees
            .checked_mul(100)
            .and_then(|value| value.checked_add(paise))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// The raw count of minor units.
    pub fn minor_units(self) -> i64 {
        self.0
    }

    /// The value in major units, for display formatting only.
    pub fn to_major_units(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Sum a sequence of amounts, saturating at the numeric limit.
    pub fn total(amounts: impl IntoIterator<Item = Amount>) -> Amount {
        Amount(
            amounts
                .into_iter()
                .fold(0i64, |sum, amount| sum.saturating_add(amount.0)),
        )
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// How an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// Direct bank transfer.
    Bank,
    /// Mobile payment app.
    Mobile,
}

impl PaymentMethod {
    /// All payment methods, in the order the expense form lists them.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Credit,
        PaymentMethod::Debit,
        PaymentMethod::Bank,
        PaymentMethod::Mobile,
    ];

    /// The key used in form values, e.g. "credit".
    pub fn as_key(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Mobile => "mobile",
        }
    }

    /// The human-readable name, e.g. "Credit Card".
    pub fn display_name(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Credit => "Credit Card",
            PaymentMethod::Debit => "Debit Card",
            PaymentMethod::Bank => "Bank Transfer",
            PaymentMethod::Mobile => "Mobile Payment",
        }
    }

    /// The icon shown next to the payment method name.
    pub fn icon(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "💵",
            PaymentMethod::Credit | PaymentMethod::Debit => "💳",
            PaymentMethod::Bank => "🏦",
            PaymentMethod::Mobile => "📱",
        }
    }
}

/// The kind-specific payload of a [Record].
///
/// Expenses and receipts share the common fields on [Record]; the fields that
/// only make sense for one kind live here, behind an explicit discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordKind {
    /// A transaction entered by the user.
    Expense {
        /// How the expense was paid.
        payment_method: PaymentMethod,
    },
    /// A documented purchase with an optional attached document.
    Receipt {
        /// Who the purchase was made from, e.g. "SuperMart".
        vendor: String,
        /// Whether a receipt document is attached.
        has_attachment: bool,
    },
}

/// A single financial record: an expense or a receipt.
///
/// Records are immutable once created. Use [Record::expense] or
/// [Record::receipt] to create one; both validate the category key against
/// the injected [CategoryTable].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// An opaque unique identifier, e.g. "exp1".
    pub id: String,
    /// The amount of money spent.
    pub amount: Amount,
    /// A text label describing the record. Receipts call this their title.
    pub description: String,
    /// The key of the category this record belongs to.
    pub category: String,
    /// When the money was spent.
    pub date: PrimitiveDateTime,
    /// The kind-specific payload.
    pub kind: RecordKind,
}

impl Record {
    /// Create an expense record.
    ///
    /// # Errors
    /// Returns [Error::EmptyDescription] if `description` is blank, or
    /// [Error::UnknownCategory] if `category` is not in the table.
    pub fn expense(
        id: &str,
        amount: Amount,
        description: &str,
        category: &str,
        date: PrimitiveDateTime,
        payment_method: PaymentMethod,
        categories: &CategoryTable,
    ) -> Result<Self, Error> {
        Self::new(
            id,
            amount,
            description,
            category,
            date,
            RecordKind::Expense { payment_method },
            categories,
        )
    }

    /// Create a receipt record.
    ///
    /// # Errors
    /// Returns [Error::EmptyDescription] if `title` is blank, or
    /// [Error::UnknownCategory] if `category` is not in the table.
    pub fn receipt(
        id: &str,
        amount: Amount,
        title: &str,
        category: &str,
        date: PrimitiveDateTime,
        vendor: &str,
        has_attachment: bool,
        categories: &CategoryTable,
    ) -> Result<Self, Error> {
        Self::new(
            id,
            amount,
            title,
            category,
            date,
            RecordKind::Receipt {
                vendor: vendor.to_owned(),
                has_attachment,
            },
            categories,
        )
    }

    fn new(
        id: &str,
        amount: Amount,
        description: &str,
        category: &str,
        date: PrimitiveDateTime,
        kind: RecordKind,
        categories: &CategoryTable,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        categories.validate_key(category)?;

        Ok(Self {
            id: id.to_owned(),
            amount,
            description: description.to_owned(),
            category: category.to_owned(),
            date,
            kind,
        })
    }

    /// Whether this record is an expense.
    pub fn is_expense(&self) -> bool {
        matches!(self.kind, RecordKind::Expense { .. })
    }

    /// Whether this record is a receipt.
    pub fn is_receipt(&self) -> bool {
        matches!(self.kind, RecordKind::Receipt { .. })
    }

    /// The payment method, for expenses.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        match self.kind {
            RecordKind::Expense { payment_method } => Some(payment_method),
            RecordKind::Receipt { .. } => None,
        }
    }

    /// The vendor name, for receipts.
    pub fn vendor(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::Receipt { vendor, .. } => Some(vendor),
            RecordKind::Expense { .. } => None,
        }
    }

    /// Whether a receipt document is attached. Always false for expenses.
    pub fn has_attachment(&self) -> bool {
        matches!(
            self.kind,
            RecordKind::Receipt {
                has_attachment: true,
                ..
            }
        )
    }
}


#[cfg(test)]
mod record_tests {
    use time::macros::datetime;

    use super::{Amount, PaymentMethod, Record};
    use crate::{Error, category::CategoryTable};

    #[test]
    fn expense_creation_validates_category() {
        let categories = CategoryTable::default();

        let result = Record::expense(
            "exp1",
            Amount::parse("42.99").unwrap(),
            "Weekly Grocery Shopping",
            "groceries",
            datetime!(2023-05-01 10:30),
            PaymentMethod::Credit,
            &categories,
        );

        assert_eq!(result, Err(Error::UnknownCategory("groceries".to_owned())));
    }

    #[test]
    fn expense_creation_rejects_blank_description() {
        let categories = CategoryTable::default();

        let result = Record::expense(
            "exp1",
            Amount::parse("42.99").unwrap(),
            "   ",
            "food",
            datetime!(2023-05-01 10:30),
            PaymentMethod::Credit,
            &categories,
        );

        assert_eq!(result, Err(Error::EmptyDescription));
    }

    #[test]
    fn receipt_carries_vendor_and_attachment() {
        let categories = CategoryTable::default();

        let receipt = Record::receipt(
            "rec1",
            Amount::parse("1250.75").unwrap(),
            "Grocery Shopping",
            "food",
            datetime!(2023-05-10 0:00),
            "SuperMart",
            true,
            &categories,
        )
        .unwrap();

        assert!(receipt.is_receipt());
        assert_eq!(receipt.vendor(), Some("SuperMart"));
        assert!(receipt.has_attachment());
        assert_eq!(receipt.payment_method(), None);
    }

    #[test]
    fn expense_has_no_receipt_fields() {
        let categories = CategoryTable::default();

        let expense = Record::expense(
            "exp1",
            Amount::parse("42.99").unwrap(),
            "Weekly Grocery Shopping",
            "food",
            datetime!(2023-05-01 10:30),
            PaymentMethod::Credit,
            &categories,
        )
        .unwrap();

        assert!(expense.is_expense());
        assert_eq!(expense.vendor(), None);
        assert!(!expense.has_attachment());
        assert_eq!(expense.payment_method(), Some(PaymentMethod::Credit));
    }
}
