// Turns raw request parameters into validated FindOptions.
//
// Responsibilities
// - Parse `since` / `before` as RFC 3339 timestamps. A malformed value fails the whole build.
// - Parse `page` / `limit` best effort. Anything unusable falls back to a default, never an error.
//
// The two policies differ on purpose: clients already rely on sloppy paging
// parameters being accepted, while a bad timestamp would silently widen the window.

use crate::modules::time_entries::core::find_options::{
    FindOptions, ListingScope, PageRequest, TimeWindow,
};
use crate::shared::core::primitives::UnixSeconds;
use chrono::DateTime;
use thiserror::Error;

pub const DEFAULT_PAGE: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid `{field}` timestamp {value:?}, expected RFC 3339")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    default_page_size: u32,
    max_page_size: u32,
}

impl PaginationSettings {
    pub fn new(default_page_size: u32, max_page_size: u32) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self::new(30, 50)
    }
}

/// Listing parameters exactly as they arrived on the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub since: Option<String>,
    pub before: Option<String>,
}

impl ListQuery {
    /// Collects decoded query string pairs. The first occurrence of a parameter wins,
    /// unknown parameters are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "since" => &mut query.since,
                "before" => &mut query.before,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

#[derive(Debug, Clone, Copy)]
enum Rounding {
    Up,
    Down,
}

impl FindOptions {
    pub fn build(
        query: &ListQuery,
        scope: ListingScope,
        settings: &PaginationSettings,
    ) -> Result<Self, ParseError> {
        // Stored times are whole seconds, so a fractional bound is tightened inwards.
        let after = parse_timestamp("since", query.since.as_deref(), Rounding::Up)?;
        let before = parse_timestamp("before", query.before.as_deref(), Rounding::Down)?;

        Ok(Self {
            scope,
            window: TimeWindow { after, before },
            page: PageRequest {
                page: parse_page(query.page.as_deref()),
                page_size: parse_limit(query.limit.as_deref(), settings),
            },
        })
    }
}

fn parse_timestamp(
    field: &'static str,
    raw: Option<&str>,
    rounding: Rounding,
) -> Result<Option<UnixSeconds>, ParseError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| {
            let seconds = parsed.timestamp();
            match rounding {
                Rounding::Up if parsed.timestamp_subsec_nanos() > 0 => Some(seconds + 1),
                _ => Some(seconds),
            }
        })
        .map_err(|source| ParseError::InvalidTimestamp {
            field,
            value: raw.to_string(),
            source,
        })
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

fn parse_page(raw: Option<&str>) -> u32 {
    parse_positive(raw).unwrap_or(DEFAULT_PAGE)
}

fn parse_limit(raw: Option<&str>, settings: &PaginationSettings) -> u32 {
    parse_positive(raw)
        .unwrap_or(settings.default_page_size())
        .min(settings.max_page_size())
}
