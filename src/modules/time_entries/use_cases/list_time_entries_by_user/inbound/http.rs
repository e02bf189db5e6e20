use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::time_entries::core::time_entry::EnrichedTimeEntry;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::handler::{
    ListingResult, ServiceError,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::query_options::ListQuery;
use crate::shell::identity::Caller;
use crate::shell::state::AppState;

pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");
pub const PAGE_HEADER: HeaderName = HeaderName::from_static("x-page");
pub const PER_PAGE_HEADER: HeaderName = HeaderName::from_static("x-per-page");

#[derive(Debug, Serialize)]
pub struct TrackedTimeResponse {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_display_name: String,
    pub project_id: String,
    pub project_name: String,
    pub project_number: i64,
    /// Seconds.
    pub duration: u64,
    pub created: String,
    pub note: Option<String>,
}

impl From<EnrichedTimeEntry> for TrackedTimeResponse {
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

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// `GET /user/times`
pub async fn list_my_time_entries(
    State(state): State<AppState>,
    Caller(user_id): Caller,
    raw_query: RawQuery,
) -> Response {
    match list_query(raw_query) {
        Ok(query) => respond(state.list_handler.list_for_caller(&user_id, &query).await),
        Err(rejection) => rejection,
    }
}

/// `GET /users/{username}/times`
pub async fn list_user_time_entries(
    State(state): State<AppState>,
    Path(username): Path<String>,
    raw_query: RawQuery,
) -> Response {
    match list_query(raw_query) {
        Ok(query) => respond(state.list_handler.list_for_username(&username, &query).await),
        Err(rejection) => rejection,
    }
}

// Repeated parameters keep their first value instead of failing deserialization.
fn list_query(raw_query: RawQuery) -> Result<ListQuery, Response> {
    match raw_query {
        Ok(Query(pairs)) => Ok(ListQuery::from_pairs(pairs)),
        Err(rejection) => Err((
            rejection.status(),
            Json(ErrorResponse {
                message: rejection.body_text(),
            }),
        )
            .into_response()),
    }
}

fn respond(result: Result<ListingResult, ServiceError>) -> Response {
    match result {
        Ok(listing) => {
            let mut headers = HeaderMap::new();
            headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(listing.total_count));
            headers.insert(PAGE_HEADER, HeaderValue::from(listing.page));
            headers.insert(PER_PAGE_HEADER, HeaderValue::from(listing.page_size));
            let body: Vec<TrackedTimeResponse> =
                listing.items.into_iter().map(Into::into).collect();
            (StatusCode::OK, headers, Json(body)).into_response()
        }
        Err(error) => {
            let status = match error {
                ServiceError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
                ServiceError::UnknownIdentity { .. } => StatusCode::NOT_FOUND,
                ServiceError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let message = if error.is_client_error() {
                error.to_string()
            } else {
                "internal server error".to_string()
            };
            (status, Json(ErrorResponse { message })).into_response()
        }
    }
}
