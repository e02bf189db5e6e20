// Shared test fixtures for tracked times, users and projects.

use crate::modules::time_entries::adapters::outbound::in_memory_store::{
    ProjectRecord, UserRecord,
};
use crate::modules::time_entries::core::time_entry::TimeEntry;

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    pub fn new() -> Self {
        let inner: TimeEntry = serde_json::from_str(include_str!("json/time_entry.json"))
            .expect("time_entry.json fixture is valid");
        Self { inner }
    }

    pub fn time_entry_id(mut self, v: impl Into<String>) -> Self {
        self.inner.time_entry_id = v.into();
        self
    }

    pub fn user_id(mut self, v: impl Into<String>) -> Self {
        self.inner.user_id = v.into();
        self
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.inner.project_id = v.into();
        self
    }

    pub fn duration_seconds(mut self, v: u64) -> Self {
        self.inner.duration_seconds = v;
        self
    }

    pub fn created_at(mut self, v: i64) -> Self {
        self.inner.created_at = v;
        self
    }

    pub fn note(mut self, v: Option<&str>) -> Self {
        self.inner.note = v.map(String::from);
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}

pub fn make_user_record(user_id: &str, handle: &str) -> UserRecord {
    let mut display_name = handle.to_string();
    if let Some(first) = display_name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    UserRecord {
        user_id: user_id.to_string(),
        handle: handle.to_string(),
        display_name,
    }
}

pub fn make_project_record(project_id: &str, name: &str, number: i64) -> ProjectRecord {
    ProjectRecord {
        project_id: project_id.to_string(),
        name: name.to_string(),
        number,
    }
}

#[cfg(test)]
mod time_entry_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = TimeEntryBuilder::default().build();
        assert_eq!(built.time_entry_id, "te-fixed-0001");
        assert_eq!(built.user_id, "user-0001");
        assert_eq!(built.project_id, "project-0001");
        assert_eq!(built.duration_seconds, 3600);
        assert_eq!(built.created_at, 1_700_000_000);
        assert_eq!(built.note.as_deref(), Some("This is a test"));
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = TimeEntryBuilder::new()
            .time_entry_id("te-123")
            .user_id("user-456")
            .project_id("project-789")
            .duration_seconds(60)
            .created_at(100)
            .note(None)
            .build();

        assert_eq!(custom.time_entry_id, "te-123");
        assert_eq!(custom.user_id, "user-456");
        assert_eq!(custom.project_id, "project-789");
        assert_eq!(custom.duration_seconds, 60);
        assert_eq!(custom.created_at, 100);
        assert_eq!(custom.note, None);
    }

    #[rstest]
    fn it_should_capitalise_the_display_name_of_user_records() {
        assert_eq!(make_user_record("u-1", "alice").display_name, "Alice");
    }
}
