use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::time_entries::core::time_entry::EnrichedTimeEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::{
    ListingResult, ServiceError,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::query_options::ListQuery;
use crate::shell::identity::Caller;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTrackedTime {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_display_name: String,
    pub project_id: String,
    pub project_name: String,
    pub project_number: i64,
    pub duration: u64,
    pub created: String,
    pub note: Option<String>,
}

impl From<EnrichedTimeEntry> for GqlTrackedTime {
    fn from(v: EnrichedTimeEntry) -> Self {
        Self {
            created: v.entry.created_at_rfc3339(),
            id: v.entry.time_entry_id,
            user_id: v.entry.user_id,
            user_name: v.owner.handle,
            user_display_name: v.owner.display_name,
            project_id: v.entry.project_id,
            project_name: v.project.name,
            project_number: v.project.number,
            duration: v.entry.duration_seconds,
            note: v.entry.note,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTrackedTimeList {
    pub items: Vec<GqlTrackedTime>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl From<ListingResult> for GqlTrackedTimeList {
    fn from(v: ListingResult) -> Self {
        Self {
            items: v.items.into_iter().map(Into::into).collect(),
            total_count: v.total_count,
            page: v.page,
            page_size: v.page_size,
        }
    }
}

// Paging arguments go through the same lenient parsing as the HTTP query string.
fn list_query(
    page: Option<i64>,
    limit: Option<i64>,
    since: Option<String>,
    before: Option<String>,
) -> ListQuery {
    ListQuery {
        page: page.map(|v| v.to_string()),
        limit: limit.map(|v| v.to_string()),
        since,
        before,
    }
}

fn to_gql_error(error: ServiceError) -> async_graphql::Error {
    let code = match &error {
        ServiceError::InvalidTimestamp(_) => "BAD_USER_INPUT",
        ServiceError::UnknownIdentity { .. } => "NOT_FOUND",
        ServiceError::StoreUnavailable(_) => "INTERNAL_SERVER_ERROR",
    };
    let message = if error.is_client_error() {
        error.to_string()
    } else {
        "internal server error".to_string()
    };
    async_graphql::Error::new(message).extend_with(|_, extensions| extensions.set("code", code))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Tracked times of the authenticated caller, oldest first.
    async fn my_tracked_times(
        &self,
        context: &Context<'_>,
        page: Option<i64>,
        limit: Option<i64>,
        since: Option<String>,
        before: Option<String>,
    ) -> GqlResult<GqlTrackedTimeList> {
        let state = context.data_unchecked::<AppState>();
        let Caller(user_id) = context
            .data_opt::<Caller>()
            .ok_or_else(|| {
                async_graphql::Error::new("authentication required")
                    .extend_with(|_, extensions| extensions.set("code", "UNAUTHENTICATED"))
            })?;
        let listing = state
            .list_handler
            .list_for_caller(user_id, &list_query(page, limit, since, before))
            .await
            .map_err(to_gql_error)?;
        Ok(listing.into())
    }

    /// Tracked times of the user with the given handle, oldest first.
    async fn user_tracked_times(
        &self,
        context: &Context<'_>,
        username: String,
        page: Option<i64>,
        limit: Option<i64>,
        since: Option<String>,
        before: Option<String>,
    ) -> GqlResult<GqlTrackedTimeList> {
        let state = context.data_unchecked::<AppState>();
        let listing = state
            .list_handler
            .list_for_username(&username, &list_query(page, limit, since, before))
            .await
            .map_err(to_gql_error)?;
        Ok(listing.into())
    }
}
