// Options a store needs to answer "which tracked times, and which slice of them".
//
// Invariants
// - Exactly one scope per request. There is no "all users" scope.
// - An inverted window (after > before) is legal and matches nothing.
// - PageRequest.page >= 1 and PageRequest.page_size >= 1.

use crate::shared::core::primitives::{UnixSeconds, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingScope {
    ByUser(UserId),
}

impl ListingScope {
    pub fn user_id(&self) -> &str {
        match self {
            ListingScope::ByUser(user_id) => user_id,
        }
    }
}

/// Inclusive on both ends. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: Option<UnixSeconds>,
    pub before: Option<UnixSeconds>,
}

impl TimeWindow {
    pub fn contains(&self, created_at: UnixSeconds) -> bool {
        self.after.is_none_or(|after| created_at >= after)
            && self.before.is_none_or(|before| created_at <= before)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    pub scope: ListingScope,
    pub window: TimeWindow,
    pub page: PageRequest,
}
