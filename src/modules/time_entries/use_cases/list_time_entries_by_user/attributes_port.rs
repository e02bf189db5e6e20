// Bulk lookups of the display attributes attached to tracked times.
//
// Ids missing from the returned maps are treated as unresolved by the caller.

use crate::modules::time_entries::core::time_entry::{ProjectReference, UserDisplay};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::queries_port::StoreError;
use crate::shared::core::primitives::{ProjectId, UserId};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

#[async_trait]
pub trait AttributeResolver: Send + Sync {
    async fn resolve_users(
        &self,
        user_ids: &BTreeSet<UserId>,
    ) -> Result<HashMap<UserId, UserDisplay>, StoreError>;

    async fn resolve_projects(
        &self,
        project_ids: &BTreeSet<ProjectId>,
    ) -> Result<HashMap<ProjectId, ProjectReference>, StoreError>;
}
