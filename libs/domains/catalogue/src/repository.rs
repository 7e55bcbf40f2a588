use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::error::{CatalogueError, CatalogueResult};
use crate::models::{CatalogueItem, NewCatalogueItem};
use crate::pagination::page_offset;

/// Data access for catalogue items.
///
/// `add`, `update` and `delete` only stage changes; nothing is durable until
/// the owning [`UnitOfWork`] commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Active items, newest first
    async fn get_all(&self) -> CatalogueResult<Vec<CatalogueItem>>;

    /// One page of active items, newest first, with the total active count
    async fn get_paged(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> CatalogueResult<(Vec<CatalogueItem>, u64)>;

    /// Read-only lookup, regardless of `is_active`
    async fn get_by_id(&self, id: i64) -> CatalogueResult<Option<CatalogueItem>>;

    /// Lookup of an item about to be modified in this scope
    async fn get_by_id_for_update(&self, id: i64) -> CatalogueResult<Option<CatalogueItem>>;

    /// Stage an insert; the returned item carries its assigned id
    async fn add(&self, item: NewCatalogueItem) -> CatalogueResult<CatalogueItem>;

    /// Stage a full-row replace; returns the row as the store will keep it
    async fn update(&self, item: CatalogueItem) -> CatalogueResult<CatalogueItem>;

    /// Stage a removal; `false` when there is nothing to remove
    async fn delete(&self, id: i64) -> CatalogueResult<bool>;

    async fn exists(&self, id: i64) -> CatalogueResult<bool>;
}

/// Makes the staged changes of a scope durable, all or nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// No-op when nothing was staged
    async fn commit(&self) -> CatalogueResult<()>;
}

/// Hands out one repository + unit-of-work scope per operation.
///
/// Dropping a scope without committing discards its staged changes.
pub trait CatalogueStore: Send + Sync + 'static {
    type Scope: CatalogueRepository + UnitOfWork;

    fn scope(&self) -> Self::Scope;
}

#[derive(Debug, Default)]
struct InMemoryState {
    items: RwLock<BTreeMap<i64, CatalogueItem>>,
    sequence: AtomicI64,
}

/// In-memory store (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogueStore {
    state: Arc<InMemoryState>,
}

impl InMemoryCatalogueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogueStore for InMemoryCatalogueStore {
    type Scope = InMemoryCatalogueRepository;

    fn scope(&self) -> Self::Scope {
        InMemoryCatalogueRepository {
            state: self.state.clone(),
            staged: Mutex::new(Vec::new()),
        }
    }
}

#[derive(Debug)]
enum StagedChange {
    Insert(CatalogueItem),
    Update(CatalogueItem),
    Delete(i64),
}

/// Scope over an [`InMemoryCatalogueStore`].
///
/// Reads see committed state only; staged changes are applied under a single
/// write lock on commit. A commit whose staged update targets an item removed
/// by another scope in the meantime fails with `NotFound` and applies nothing.
#[derive(Debug)]
pub struct InMemoryCatalogueRepository {
    state: Arc<InMemoryState>,
    staged: Mutex<Vec<StagedChange>>,
}

fn newest_first(items: &mut [CatalogueItem]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl InMemoryCatalogueRepository {
    async fn active_items(&self) -> Vec<CatalogueItem> {
        let items = self.state.items.read().await;
        let mut active: Vec<CatalogueItem> =
            items.values().filter(|i| i.is_active).cloned().collect();
        newest_first(&mut active);
        active
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryCatalogueRepository {
    async fn get_all(&self) -> CatalogueResult<Vec<CatalogueItem>> {
        Ok(self.active_items().await)
    }

    async fn get_paged(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> CatalogueResult<(Vec<CatalogueItem>, u64)> {
        let active = self.active_items().await;
        let total = active.len() as u64;
        let skip = usize::try_from(page_offset(page_number, page_size)).unwrap_or(usize::MAX);

        let page = active
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();

        Ok((page, total))
    }

    async fn get_by_id(&self, id: i64) -> CatalogueResult<Option<CatalogueItem>> {
        let items = self.state.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn get_by_id_for_update(&self, id: i64) -> CatalogueResult<Option<CatalogueItem>> {
        self.get_by_id(id).await
    }

    async fn add(&self, item: NewCatalogueItem) -> CatalogueResult<CatalogueItem> {
        let id = self.state.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let item = item.with_id(id);

        self.staged
            .lock()
            .await
            .push(StagedChange::Insert(item.clone()));
        Ok(item)
    }

    async fn update(&self, item: CatalogueItem) -> CatalogueResult<CatalogueItem> {
        self.staged
            .lock()
            .await
            .push(StagedChange::Update(item.clone()));
        Ok(item)
    }

    async fn delete(&self, id: i64) -> CatalogueResult<bool> {
        if self.get_by_id_for_update(id).await?.is_none() {
            return Ok(false);
        }

        self.staged.lock().await.push(StagedChange::Delete(id));
        Ok(true)
    }

    async fn exists(&self, id: i64) -> CatalogueResult<bool> {
        let items = self.state.items.read().await;
        Ok(items.contains_key(&id))
    }
}

#[async_trait]
impl UnitOfWork for InMemoryCatalogueRepository {
    async fn commit(&self) -> CatalogueResult<()> {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        if staged.is_empty() {
            return Ok(());
        }

        let mut items = self.state.items.write().await;

        let inserted = |id: i64| {
            staged
                .iter()
                .any(|change| matches!(change, StagedChange::Insert(item) if item.id == id))
        };
        let vanished = staged.iter().find_map(|change| match change {
            StagedChange::Update(item) if !items.contains_key(&item.id) && !inserted(item.id) => {
                Some(item.id)
            }
            _ => None,
        });
        if let Some(id) = vanished {
            tracing::warn!(item_id = id, "Discarding scope: updated item no longer exists");
            return Err(CatalogueError::NotFound(id));
        }

        for change in staged {
            match change {
                StagedChange::Insert(item) | StagedChange::Update(item) => {
                    items.insert(item.id, item);
                }
                StagedChange::Delete(id) => {
                    items.remove(&id);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn new_item(title: &str, minutes_ago: i64) -> NewCatalogueItem {
        let created_at = Utc::now() - Duration::minutes(minutes_ago);
        NewCatalogueItem {
            title: title.to_string(),
            publisher: "Publisher".to_string(),
            developer: "Developer".to_string(),
            release_date: created_at,
            genre: Genre::Action,
            price: Decimal::new(2999, 2),
            description: String::new(),
            rating: 8,
            cover_image_url: String::new(),
            is_active: true,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_add_is_invisible_until_commit() {
        let store = InMemoryCatalogueStore::new();
        let scope = store.scope();

        let item = scope.add(new_item("Doom", 0)).await.unwrap();
        assert_eq!(item.id, 1);
        assert!(scope.get_by_id(item.id).await.unwrap().is_none());

        scope.commit().await.unwrap();
        assert!(store.scope().get_by_id(item.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_dropped_scope_discards_changes_but_consumes_ids() {
        let store = InMemoryCatalogueStore::new();
        {
            let scope = store.scope();
            scope.add(new_item("Abandoned", 0)).await.unwrap();
        }

        let scope = store.scope();
        assert!(scope.get_all().await.unwrap().is_empty());

        let item = scope.add(new_item("Kept", 0)).await.unwrap();
        assert_eq!(item.id, 2);
    }

    #[tokio::test]
    async fn test_paged_excludes_inactive_and_orders_newest_first() {
        let store = InMemoryCatalogueStore::new();
        let scope = store.scope();
        scope.add(new_item("Oldest", 30)).await.unwrap();
        scope.add(new_item("Newest", 0)).await.unwrap();
        let mut hidden = new_item("Hidden", 10);
        hidden.is_active = false;
        scope.add(hidden).await.unwrap();
        scope.commit().await.unwrap();

        let (page, total) = store.scope().get_paged(1, 10).await.unwrap();
        assert_eq!(total, 2);
        let titles: Vec<_> = page.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Oldest"]);

        let (second, total) = store.scope().get_paged(2, 1).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(second[0].title, "Oldest");
    }

    #[tokio::test]
    async fn test_update_of_concurrently_deleted_item_fails_commit() {
        let store = InMemoryCatalogueStore::new();
        let setup = store.scope();
        let item = setup.add(new_item("Contested", 0)).await.unwrap();
        let other = setup.add(new_item("Bystander", 5)).await.unwrap();
        setup.commit().await.unwrap();

        let updater = store.scope();
        let mut loaded = updater.get_by_id_for_update(item.id).await.unwrap().unwrap();

        let deleter = store.scope();
        assert!(deleter.delete(item.id).await.unwrap());
        deleter.commit().await.unwrap();

        loaded.title = "Too late".to_string();
        updater.update(loaded).await.unwrap();
        let mut renamed = other.clone();
        renamed.title = "Renamed".to_string();
        updater.update(renamed).await.unwrap();

        let result = updater.commit().await;
        assert!(matches!(result, Err(CatalogueError::NotFound(id)) if id == item.id));

        // Nothing from the failed scope was applied
        let reader = store.scope();
        assert!(!reader.exists(item.id).await.unwrap());
        assert_eq!(reader.get_by_id(other.id).await.unwrap().unwrap().title, "Bystander");
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = InMemoryCatalogueStore::new();
        let scope = store.scope();
        assert!(!scope.delete(99).await.unwrap());
        scope.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_and_delete_apply_on_commit() {
        let store = InMemoryCatalogueStore::new();
        let scope = store.scope();
        let item = scope.add(new_item("Quake", 0)).await.unwrap();
        scope.commit().await.unwrap();

        let scope = store.scope();
        let mut loaded = scope.get_by_id_for_update(item.id).await.unwrap().unwrap();
        loaded.title = "Quake II".to_string();
        scope.update(loaded).await.unwrap();
        scope.commit().await.unwrap();

        let scope = store.scope();
        assert_eq!(scope.get_by_id(item.id).await.unwrap().unwrap().title, "Quake II");

        assert!(scope.delete(item.id).await.unwrap());
        assert!(scope.exists(item.id).await.unwrap());
        scope.commit().await.unwrap();
        assert!(!scope.exists(item.id).await.unwrap());
    }
}
