//! The receipts browser: searching, category filtering and date-range
//! filtering over receipt records.

mod receipts_page;
mod view;

pub use receipts_page::get_receipts_page;
