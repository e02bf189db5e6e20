// In memory store for tracked times, users and projects.
//
// Purpose
// - Back the listing use case without a database, for tests and local runs.
//
// Responsibilities
// - Answer the TimeEntryQueries, AttributeResolver and IdentityResolver ports.
// - Keep user handles unique ignoring ASCII case, so name lookups are unambiguous.
// - Count lookups so batching behaviour can be asserted.
// - Simulate outages through the offline toggles.

use crate::modules::time_entries::core::find_options::FindOptions;
use crate::modules::time_entries::core::time_entry::{ProjectReference, TimeEntry, UserDisplay};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::attributes_port::AttributeResolver;
use crate::modules::time_entries::use_cases::list_time_entries_by_user::identity_port::{
    IdentityError, IdentityResolver,
};
use crate::modules::time_entries::use_cases::list_time_entries_by_user::queries_port::{
    StoreError, TimeEntryQueries,
};
use crate::shared::core::primitives::{ProjectId, UserId};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("handle {handle:?} of {user_id} is already taken by {existing}")]
    DuplicateHandle {
        handle: String,
        user_id: UserId,
        existing: UserId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub handle: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_id: ProjectId,
    pub name: String,
    pub number: i64,
}

/// Seed data for the store, as read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
    }
}

fn handle_key(handle: &str) -> String {
    handle.to_ascii_lowercase()
}

#[derive(Default)]
struct UserDirectory {
    by_id: HashMap<UserId, UserRecord>,
    by_handle: HashMap<String, UserId>,
}

impl UserDirectory {
    fn insert(&mut self, user: UserRecord) -> Result<(), DirectoryError> {
        let key = handle_key(&user.handle);
        if let Some(existing) = self
            .by_handle
            .get(&key)
            .filter(|existing| **existing != user.user_id)
        {
            return Err(DirectoryError::DuplicateHandle {
                handle: user.handle,
                user_id: user.user_id,
                existing: existing.clone(),
            });
        }

        let user_id = user.user_id.clone();
        if let Some(previous) = self.by_id.insert(user_id.clone(), user) {
            self.by_handle.remove(&handle_key(&previous.handle));
        }
        self.by_handle.insert(key, user_id);
        Ok(())
    }

    fn remove(&mut self, user_id: &str) -> Option<UserRecord> {
        let removed = self.by_id.remove(user_id)?;
        self.by_handle.remove(&handle_key(&removed.handle));
        Some(removed)
    }

    fn find_by_handle(&self, handle: &str) -> Option<&UserId> {
        self.by_handle.get(&handle_key(handle))
    }
}

#[derive(Default)]
pub struct InMemoryTimeEntryStore {
    entries: RwLock<Vec<TimeEntry>>,
    users: RwLock<UserDirectory>,
    projects: RwLock<HashMap<ProjectId, ProjectRecord>>,
    is_offline: bool,
    is_attributes_offline: bool,
    store_queries: AtomicUsize,
    user_lookups: AtomicUsize,
    project_lookups: AtomicUsize,
}

impl InMemoryTimeEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when two users share a handle ignoring ASCII case.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, DirectoryError> {
        let mut users = UserDirectory::default();
        for user in snapshot.users {
            users.insert(user)?;
        }
        Ok(Self {
            entries: RwLock::new(snapshot.time_entries),
            users: RwLock::new(users),
            projects: RwLock::new(
                snapshot
                    .projects
                    .into_iter()
                    .map(|project| (project.project_id.clone(), project))
                    .collect(),
            ),
            ..Self::default()
        })
    }

    /// Takes the time entry queries and identity lookups offline.
    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn toggle_attributes_offline(&mut self) {
        self.is_attributes_offline = !self.is_attributes_offline;
    }

    pub async fn insert_entry(&self, entry: TimeEntry) {
        self.entries.write().await.push(entry);
    }

    /// Adds or replaces a user. A handle owned by another user is rejected.
    pub async fn insert_user(&self, user: UserRecord) -> Result<(), DirectoryError> {
        self.users.write().await.insert(user)
    }

    pub async fn remove_user(&self, user_id: &str) -> Option<UserRecord> {
        self.users.write().await.remove(user_id)
    }

    pub async fn insert_project(&self, project: ProjectRecord) {
        self.projects
            .write()
            .await
            .insert(project.project_id.clone(), project);
    }

    pub async fn remove_project(&self, project_id: &str) -> Option<ProjectRecord> {
        self.projects.write().await.remove(project_id)
    }

    pub fn store_queries(&self) -> usize {
        self.store_queries.load(Ordering::SeqCst)
    }

    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }

    pub fn project_lookups(&self) -> usize {
        self.project_lookups.load(Ordering::SeqCst)
    }

    async fn matching(&self, options: &FindOptions) -> Result<Vec<TimeEntry>, StoreError> {
        self.store_queries.fetch_add(1, Ordering::SeqCst);
        if self.is_offline {
            return Err(StoreError::Backend("Time entry store offline".into()));
        }

        let user_id = options.scope.user_id();
        let mut items: Vec<TimeEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|entry| entry.user_id == user_id && options.window.contains(entry.created_at))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.time_entry_id.cmp(&b.time_entry_id))
        });
        Ok(items)
    }
}

#[async_trait::async_trait]
impl TimeEntryQueries for InMemoryTimeEntryStore {
    async fn find(&self, options: &FindOptions) -> Result<Vec<TimeEntry>, StoreError> {
        let offset = usize::try_from(options.page.offset()).unwrap_or(usize::MAX);
        let limit = options.page.page_size as usize;
        Ok(self
            .matching(options)
            .await?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count(&self, options: &FindOptions) -> Result<u64, StoreError> {
        Ok(self.matching(options).await?.len() as u64)
    }
}

#[async_trait::async_trait]
impl AttributeResolver for InMemoryTimeEntryStore {
    async fn resolve_users(
        &self,
        user_ids: &BTreeSet<UserId>,
    ) -> Result<HashMap<UserId, UserDisplay>, StoreError> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);
        if self.is_attributes_offline {
            return Err(StoreError::Backend("User directory offline".into()));
        }

        let users = self.users.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|user_id| users.by_id.get(user_id))
            .map(|user| {
                (
                    user.user_id.clone(),
                    UserDisplay {
                        handle: user.handle.clone(),
                        display_name: user.display_name.clone(),
                    },
                )
            })
            .collect())
    }

    async fn resolve_projects(
        &self,
        project_ids: &BTreeSet<ProjectId>,
    ) -> Result<HashMap<ProjectId, ProjectReference>, StoreError> {
        self.project_lookups.fetch_add(1, Ordering::SeqCst);
        if self.is_attributes_offline {
            return Err(StoreError::Backend("Project directory offline".into()));
        }

        let projects = self.projects.read().await;
        Ok(project_ids
            .iter()
            .filter_map(|project_id| projects.get(project_id))
            .map(|project| {
                (
                    project.project_id.clone(),
                    ProjectReference {
                        name: project.name.clone(),
                        number: project.number,
                    },
                )
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl IdentityResolver for InMemoryTimeEntryStore {
    async fn resolve_user_by_name(&self, name: &str) -> Result<UserId, IdentityError> {
        if self.is_offline {
            return Err(IdentityError::Backend("User directory offline".into()));
        }

        self.users
            .read()
            .await
            .find_by_handle(name)
            .cloned()
            .ok_or_else(|| IdentityError::NotFound(name.to_string()))
    }
}
