// Tracked time records as the store hands them out, and their enriched form.
//
// Purpose
// - TimeEntry is the raw, immutable row owned by the store.
// - EnrichedTimeEntry pairs it with the display attributes of its owner and project.
//
// Boundaries
// - Nothing here talks to a store. Resolution of attributes lives in the listing handler.

use crate::shared::core::primitives::{ProjectId, TimeEntryId, UnixSeconds, UserId};
use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub time_entry_id: TimeEntryId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub duration_seconds: u64,
    pub created_at: UnixSeconds,
    #[serde(default)]
    pub note: Option<String>,
}

impl TimeEntry {
    /// Creation time as RFC 3339 in UTC, e.g. `2023-11-14T22:13:20Z`.
    /// Empty when the stored value is outside the representable range.
    pub fn created_at_rfc3339(&self) -> String {
        DateTime::from_timestamp(self.created_at, 0)
            .map(|created| created.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDisplay {
    pub handle: String,
    pub display_name: String,
}

impl UserDisplay {
    /// Stand-in for an owner that no longer resolves, e.g. a deleted account.
    pub fn ghost() -> Self {
        Self {
            handle: "ghost".to_string(),
            display_name: "Ghost".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub name: String,
    pub number: i64,
}

impl ProjectReference {
    pub fn unknown() -> Self {
        Self {
            name: "unknown".to_string(),
            number: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedTimeEntry {
    pub entry: TimeEntry,
    pub owner: UserDisplay,
    pub project: ProjectReference,
}
