use crate::modules::time_entries::core::find_options::{FindOptions, ListingScope};
use crate::modules::time_entries::core::time_entry::{
    EnrichedTimeEntry, ProjectReference, TimeEntry, UserDisplay,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::attributes_port::AttributeResolver;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::identity_port::{
    IdentityError, IdentityResolver,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::queries_port::{
    StoreError, TimeEntryQueries,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::query_options::{
    ListQuery, PaginationSettings, ParseError,
};
use crate::shared::core::primitives::{ProjectId, UserId};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidTimestamp(#[from] ParseError),

    #[error("user {name:?} not found")]
    UnknownIdentity { name: String },

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl ServiceError {
    /// True when the caller sent something we cannot serve, as opposed to an infrastructure fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidTimestamp(_) | ServiceError::UnknownIdentity { .. }
        )
    }
}

impl From<IdentityError> for ServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::NotFound(name) => ServiceError::UnknownIdentity { name },
            IdentityError::Backend(message) => {
                ServiceError::StoreUnavailable(StoreError::Backend(message))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingResult {
    pub items: Vec<EnrichedTimeEntry>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

pub struct ListTimeEntriesHandler<TQueries, TAttributes, TIdentities>
where
    TQueries: TimeEntryQueries + 'static,
    TAttributes: AttributeResolver + 'static,
    TIdentities: IdentityResolver + 'static,
{
    queries: Arc<TQueries>,
    attributes: Arc<TAttributes>,
    identities: Arc<TIdentities>,
    pagination: PaginationSettings,
}

impl<TQueries, TAttributes, TIdentities> ListTimeEntriesHandler<TQueries, TAttributes, TIdentities>
where
    TQueries: TimeEntryQueries + 'static,
    TAttributes: AttributeResolver + 'static,
    TIdentities: IdentityResolver + 'static,
{
    pub fn new(
        queries: Arc<TQueries>,
        attributes: Arc<TAttributes>,
        identities: Arc<TIdentities>,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            queries,
            attributes,
            identities,
            pagination,
        }
    }

    /// Lists the tracked times of the authenticated caller.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_caller(
        &self,
        caller: &str,
        query: &ListQuery,
    ) -> Result<ListingResult, ServiceError> {
        let options = FindOptions::build(
            query,
            ListingScope::ByUser(caller.to_string()),
            &self.pagination,
        )?;
        self.list(&options).await
    }

    /// Lists the tracked times of the user with the given handle.
    /// The handle is resolved before anything else is looked at.
    #[tracing::instrument(skip(self))]
    pub async fn list_for_username(
        &self,
        username: &str,
        query: &ListQuery,
    ) -> Result<ListingResult, ServiceError> {
        let user_id = self.identities.resolve_user_by_name(username).await?;
        let options = FindOptions::build(query, ListingScope::ByUser(user_id), &self.pagination)?;
        self.list(&options).await
    }

    #[tracing::instrument(
        skip(self, options),
        fields(user_id = %options.scope.user_id(), page = options.page.page, page_size = options.page.page_size)
    )]
    pub async fn list(&self, options: &FindOptions) -> Result<ListingResult, ServiceError> {
        let (entries, total_count) =
            tokio::try_join!(self.queries.find(options), self.queries.count(options)).map_err(
                |error| {
                    tracing::error!(%error, "time entry query failed");
                    ServiceError::StoreUnavailable(error)
                },
            )?;

        let items = self.enrich(entries).await;
        tracing::debug!(returned = items.len(), total_count, "listed time entries");

        Ok(ListingResult {
            items,
            total_count,
            page: options.page.page,
            page_size: options.page.page_size,
        })
    }

    async fn enrich(&self, entries: Vec<TimeEntry>) -> Vec<EnrichedTimeEntry> {
        if entries.is_empty() {
            return Vec::new();
        }

        let user_ids: BTreeSet<UserId> = entries.iter().map(|e| e.user_id.clone()).collect();
        let project_ids: BTreeSet<ProjectId> =
            entries.iter().map(|e| e.project_id.clone()).collect();

        let (users, projects) = tokio::join!(
            self.attributes.resolve_users(&user_ids),
            self.attributes.resolve_projects(&project_ids)
        );
        let users = users.unwrap_or_else(|error| {
            tracing::warn!(%error, "user attributes unavailable, using placeholders");
            HashMap::new()
        });
        let projects = projects.unwrap_or_else(|error| {
            tracing::warn!(%error, "project attributes unavailable, using placeholders");
            HashMap::new()
        });

        entries
            .into_iter()
            .map(|entry| {
                let owner = users.get(&entry.user_id).cloned().unwrap_or_else(|| {
                    tracing::debug!(user_id = %entry.user_id, "owner not resolved");
                    UserDisplay::ghost()
                });
                let project = projects.get(&entry.project_id).cloned().unwrap_or_else(|| {
                    tracing::debug!(project_id = %entry.project_id, "project not resolved");
                    ProjectReference::unknown()
                });
                EnrichedTimeEntry {
                    entry,
                    owner,
                    project,
                }
            })
            .collect()
    }
}
