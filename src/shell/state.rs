use crate::modules::time_entries::adapters::outbound::in_memory_store::InMemoryTimeEntryStore;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::ListTimeEntriesHandler;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::query_options::PaginationSettings;
use std::sync::Arc;

pub type InMemoryListHandler =
    ListTimeEntriesHandler<InMemoryTimeEntryStore, InMemoryTimeEntryStore, InMemoryTimeEntryStore>;

#[derive(Clone)]
pub struct AppState {
    pub list_handler: Arc<InMemoryListHandler>,
}

impl AppState {
    pub fn in_memory(store: Arc<InMemoryTimeEntryStore>, pagination: PaginationSettings) -> Self {
        Self {
            list_handler: Arc::new(ListTimeEntriesHandler::new(
                store.clone(),
                store.clone(),
                store,
                pagination,
            )),
        }
    }
}
