//! Local copies of remote resource families.
//!
//! A [`Collection`] is the client's transient, non-authoritative view of one
//! family. Mutations are applied locally first and then sent to the API. A
//! failed request leaves the local change in place and reports
//! [`MutationOutcome::Failed`], marked stale only when the local copy
//! really changed. There is no automatic rollback; the caller decides
//! whether to [`Collection::refetch`].

use serde_json::Value;

use crate::api::{ApiClient, Resource};
use crate::error::ApiError;

/// Result of a remote mutation that was already applied locally.
#[derive(Debug)]
pub enum MutationOutcome<T = Value> {
    /// The server accepted the change.
    Confirmed(T),
    /// The request failed. `local_stale` is set when the local copy now
    /// differs from what the server holds.
    Failed { error: ApiError, local_stale: bool },
}

impl<T> MutationOutcome<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MutationOutcome::Confirmed(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, MutationOutcome::Failed { local_stale: true, .. })
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            MutationOutcome::Confirmed(value) => Ok(value),
            MutationOutcome::Failed { error, .. } => Err(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Back,
    Front,
}

#[derive(Debug, Clone)]
pub struct Collection<T: Resource> {
    items: Vec<T>,
}

impl<T: Resource> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Resource> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Replace the item with the same id, or append it.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Insert at the front, newest first.
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Reload the whole family from the server.
    pub async fn refetch(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let items = client.list::<T>().await?;
        tracing::debug!(path = T::PATH, count = items.len(), "collection refetched");
        self.items = items;
        Ok(())
    }

    /// Append locally, then POST.
    pub async fn add(&mut self, client: &ApiClient, item: T) -> MutationOutcome {
        self.insert_and_create(client, item, Placement::Back).await
    }

    /// Prepend locally, then POST.
    pub async fn add_front(&mut self, client: &ApiClient, item: T) -> MutationOutcome {
        self.insert_and_create(client, item, Placement::Front).await
    }

    async fn insert_and_create(
        &mut self,
        client: &ApiClient,
        item: T,
        placement: Placement,
    ) -> MutationOutcome {
        let index = match placement {
            Placement::Back => {
                self.items.push(item);
                self.items.len() - 1
            }
            Placement::Front => {
                self.prepend(item);
                0
            }
        };
        let result = client.create(&self.items[index]).await;

        match result {
            Ok(body) => {
                // Adopt the server's copy when it answers with the created item.
                if let Ok(created) = serde_json::from_value::<T>(body.clone()) {
                    if !created.id().is_empty() {
                        self.items[index] = created;
                    }
                }
                MutationOutcome::Confirmed(body)
            }
            Err(error) => failed(T::PATH, "create", error, true),
        }
    }

    /// Replace locally, then PUT.
    pub async fn save(&mut self, client: &ApiClient, item: T) -> MutationOutcome {
        let id = item.id().to_string();
        let before = self.find(&id).and_then(|old| serde_json::to_value(old).ok());
        self.upsert(item.clone());
        let result = client.update(&id, &item).await;
        match result {
            Ok(body) => MutationOutcome::Confirmed(body),
            Err(error) => {
                let changed = match before {
                    Some(before) => serde_json::to_value(&item)
                        .map_or(true, |after| after != before),
                    None => true,
                };
                failed(T::PATH, "update", error, changed)
            }
        }
    }

    /// Remove locally, then DELETE.
    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> MutationOutcome {
        let removed = self.remove(id).is_some();
        match client.delete::<T>(id).await {
            Ok(body) => MutationOutcome::Confirmed(body),
            Err(error) => failed(T::PATH, "delete", error, removed),
        }
    }
}

/// `local_stale` is whether the local copy was actually changed before the
/// request failed.
fn failed(path: &str, operation: &str, error: ApiError, local_stale: bool) -> MutationOutcome {
    tracing::warn!(path, operation, local_stale, "remote mutation failed: {error}");
    MutationOutcome::Failed { error, local_stale }
}
