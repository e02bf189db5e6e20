// Identifier and time primitives shared across modules.
//
// Identifiers are opaque strings handed out by the store; the listing core never
// parses them, it only compares them for equality and ordering.

pub type UserId = String;
pub type ProjectId = String;
pub type TimeEntryId = String;

/// Seconds since the Unix epoch, UTC.
pub type UnixSeconds = i64;
