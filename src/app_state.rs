//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::{
    category::CategoryTable, record::store::RecordStore, submission::SubmissionService,
};

/// The state of the server.
///
/// Everything in here is cheap to clone: the record snapshot and category
/// table are shared behind `Arc`s and never mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The read-only record snapshot.
    pub records: RecordStore,

    /// The injected category table.
    pub categories: Arc<CategoryTable>,

    /// The service that accepts expense submissions.
    pub submissions: SubmissionService,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(
        records: RecordStore,
        categories: CategoryTable,
        submissions: SubmissionService,
        local_timezone: &str,
    ) -> Self {
        Self {
            records,
            categories: Arc::new(categories),
            submissions,
            local_timezone: local_timezone.to_owned(),
        }
    }
}
