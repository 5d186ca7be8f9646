//! Financial records and the query engine that drives the list views.
//!
//! This module contains everything shared between the expense and receipt
//! pages:
//! - The [Record] model with its [Amount] and [PaymentMethod] types
//! - The query engine that computes the visible, ordered subset for a view
//! - The in-memory store holding the seeded sample records

pub mod model;
pub mod query;
pub mod store;

pub use model::{Amount, PaymentMethod, Record, RecordKind};
pub use query::{DateRangePreset, RecordQuery, SortKey, visible_records};
