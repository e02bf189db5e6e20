// Port onto the store that owns tracked times.
//
// Contract
// - `find` returns the records matching scope and window, ordered by
//   (created_at, time_entry_id) ascending, sliced by the page window.
// - `count` returns how many records match scope and window, ignoring the page window.
// - Failures surface as StoreError. Retrying is the store client's business, not ours.

use crate::modules::time_entries::core::find_options::FindOptions;
use crate::modules::time_entries::core::time_entry::TimeEntry;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TimeEntryQueries: Send + Sync {
    async fn find(&self, options: &FindOptions) -> Result<Vec<TimeEntry>, StoreError>;
    async fn count(&self, options: &FindOptions) -> Result<u64, StoreError>;
}
