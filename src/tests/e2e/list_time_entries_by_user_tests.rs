use crate::modules::time_entries::adapters::outbound::in_memory_store::InMemoryTimeEntryStore;
use crate::modules::time_entries::core::time_entry::UserDisplay;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::{
    ListTimeEntriesHandler, ServiceError,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::query_options::{
    ListQuery, PaginationSettings,
};
use crate::tests::fixtures::time_entries::{
    TimeEntryBuilder, make_project_record, make_user_record,
};
use std::sync::Arc;

async fn seeded_store() -> Arc<InMemoryTimeEntryStore> {
    let store = Arc::new(InMemoryTimeEntryStore::new());
    store
        .insert_user(make_user_record("user-u", "u"))
        .await
        .unwrap();
    store
        .insert_project(make_project_record("project-0001", "tracker", 12))
        .await;
    for created_at in [300, 100, 200] {
        store
            .insert_entry(
                TimeEntryBuilder::new()
                    .time_entry_id(format!("te-{created_at}"))
                    .user_id("user-u")
                    .created_at(created_at)
                    .build(),
            )
            .await;
    }
    store
}

fn query(pairs: &[(&str, &str)]) -> ListQuery {
    let mut query = ListQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "page" => query.page = value,
            "limit" => query.limit = value,
            "since" => query.since = value,
            "before" => query.before = value,
            other => panic!("unknown parameter {other}"),
        }
    }
    query
}

#[tokio::test]
async fn lists_entries_since_a_timestamp() {
    let store = seeded_store().await;
    let handler =
        ListTimeEntriesHandler::new(store.clone(), store.clone(), store, PaginationSettings::default());

    let result = handler
        .list_for_caller("user-u", &query(&[("since", "1970-01-01T00:02:30Z")]))
        .await
        .unwrap();

    let created: Vec<_> = result.items.iter().map(|i| i.entry.created_at).collect();
    assert_eq!(created, vec![200, 300]);
    assert_eq!(result.total_count, 2);
}

#[tokio::test]
async fn excludes_an_entry_just_before_a_fractional_since() {
    let store = seeded_store().await;
    let handler =
        ListTimeEntriesHandler::new(store.clone(), store.clone(), store, PaginationSettings::default());

    let result = handler
        .list_for_caller("user-u", &query(&[("since", "1970-01-01T00:01:40.5Z")]))
        .await
        .unwrap();

    let created: Vec<_> = result.items.iter().map(|i| i.entry.created_at).collect();
    assert_eq!(created, vec![200, 300]);
    assert_eq!(result.total_count, 2);
}

#[tokio::test]
async fn lists_exactly_the_second_entry_on_page_two_of_size_one() {
    let store = seeded_store().await;
    let handler =
        ListTimeEntriesHandler::new(store.clone(), store.clone(), store, PaginationSettings::default());

    let result = handler
        .list_for_username("u", &query(&[("limit", "1"), ("page", "2")]))
        .await
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].entry.time_entry_id, "te-200");
    assert_eq!(result.items[0].project.number, 12);
    assert_eq!(result.total_count, 3);
}

#[tokio::test]
async fn lists_entries_of_a_deleted_user_with_a_placeholder_owner() {
    let store = seeded_store().await;
    store.remove_user("user-u").await;
    let handler =
        ListTimeEntriesHandler::new(store.clone(), store.clone(), store, PaginationSettings::default());

    let result = handler
        .list_for_caller("user-u", &ListQuery::default())
        .await
        .unwrap();

    assert_eq!(result.items.len(), 3);
    assert!(result.items.iter().all(|i| i.owner == UserDisplay::ghost()));
}

#[tokio::test]
async fn rejects_a_malformed_since_but_tolerates_a_malformed_page() {
    let store = seeded_store().await;
    let handler =
        ListTimeEntriesHandler::new(store.clone(), store.clone(), store, PaginationSettings::default());

    let error = handler
        .list_for_caller("user-u", &query(&[("since", "not-a-date")]))
        .await
        .unwrap_err();
    assert!(matches!(error, ServiceError::InvalidTimestamp(_)));

    let result = handler
        .list_for_caller("user-u", &query(&[("page", "abc")]))
        .await
        .unwrap();
    assert_eq!(result.page, 1);
    assert_eq!(result.items.len(), 3);
}

#[tokio::test]
async fn returns_nothing_for_an_inverted_window() {
    let store = seeded_store().await;
    let handler =
        ListTimeEntriesHandler::new(store.clone(), store.clone(), store, PaginationSettings::default());

    let result = handler
        .list_for_caller(
            "user-u",
            &query(&[
                ("since", "1970-01-01T00:05:00Z"),
                ("before", "1970-01-01T00:01:40Z"),
            ]),
        )
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total_count, 0);
}
