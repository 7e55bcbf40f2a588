use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    entity,
    error::{CatalogueError, CatalogueResult},
    models::{CatalogueItem, NewCatalogueItem},
    pagination::page_offset,
    repository::{CatalogueRepository, CatalogueStore, UnitOfWork},
};

/// PostgreSQL-backed store; each scope owns at most one transaction.
#[derive(Clone)]
pub struct PgCatalogueStore {
    db: DatabaseConnection,
}

impl PgCatalogueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CatalogueStore for PgCatalogueStore {
    type Scope = PgCatalogueRepository;

    fn scope(&self) -> Self::Scope {
        PgCatalogueRepository::new(self.db.clone())
    }
}

/// Repository and unit of work over one lazily started transaction.
///
/// Reads run inside the transaction once it exists and on the pool before
/// that. Dropping the repository without committing rolls the transaction
/// back.
pub struct PgCatalogueRepository {
    db: DatabaseConnection,
    txn: Mutex<Option<DatabaseTransaction>>,
}

impl PgCatalogueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            txn: Mutex::new(None),
        }
    }

    /// Locks the scope's transaction slot, beginning a transaction if none is open.
    async fn transaction(&self) -> CatalogueResult<MutexGuard<'_, Option<DatabaseTransaction>>> {
        let mut guard = self.txn.lock().await;
        if guard.is_none() {
            *guard = Some(self.db.begin().await?);
            tracing::debug!("Started unit-of-work transaction");
        }
        Ok(guard)
    }
}

fn open(txn: &Option<DatabaseTransaction>) -> CatalogueResult<&DatabaseTransaction> {
    txn.as_ref()
        .ok_or_else(|| CatalogueError::Internal("transaction was not started".to_string()))
}

fn active_newest_first() -> Select<entity::Entity> {
    entity::Entity::find()
        .filter(entity::Column::IsActive.eq(true))
        .order_by_desc(entity::Column::CreatedAt)
        .order_by_desc(entity::Column::Id)
}

async fn find_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<entity::Model>, DbErr> {
    active_newest_first().all(conn).await
}

async fn find_page<C: ConnectionTrait>(
    conn: &C,
    page_number: u64,
    page_size: u64,
) -> Result<(Vec<entity::Model>, u64), DbErr> {
    let total = entity::Entity::find()
        .filter(entity::Column::IsActive.eq(true))
        .count(conn)
        .await?;

    let offset = page_offset(page_number, page_size);
    if offset >= total {
        return Ok((Vec::new(), total));
    }

    let models = active_newest_first()
        .offset(offset)
        .limit(page_size)
        .all(conn)
        .await?;

    Ok((models, total))
}

async fn find_one<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<entity::Model>, DbErr> {
    entity::Entity::find_by_id(id).one(conn).await
}

async fn count_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, DbErr> {
    entity::Entity::find_by_id(id).count(conn).await
}

fn into_items(models: Vec<entity::Model>) -> Vec<CatalogueItem> {
    models.into_iter().map(Into::into).collect()
}

#[async_trait]
impl CatalogueRepository for PgCatalogueRepository {
    async fn get_all(&self) -> CatalogueResult<Vec<CatalogueItem>> {
        let guard = self.txn.lock().await;
        let models = match guard.as_ref() {
            Some(txn) => find_all(txn).await?,
            None => find_all(&self.db).await?,
        };
        Ok(into_items(models))
    }

    async fn get_paged(
        &self,
        page_number: u64,
        page_size: u64,
    ) -> CatalogueResult<(Vec<CatalogueItem>, u64)> {
        let guard = self.txn.lock().await;
        let (models, total) = match guard.as_ref() {
            Some(txn) => find_page(txn, page_number, page_size).await?,
            None => find_page(&self.db, page_number, page_size).await?,
        };
        Ok((into_items(models), total))
    }

    async fn get_by_id(&self, id: i64) -> CatalogueResult<Option<CatalogueItem>> {
        let guard = self.txn.lock().await;
        let model = match guard.as_ref() {
            Some(txn) => find_one(txn, id).await?,
            None => find_one(&self.db, id).await?,
        };
        Ok(model.map(Into::into))
    }

    async fn get_by_id_for_update(&self, id: i64) -> CatalogueResult<Option<CatalogueItem>> {
        let guard = self.transaction().await?;
        let model = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(open(&guard)?)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn add(&self, item: NewCatalogueItem) -> CatalogueResult<CatalogueItem> {
        let guard = self.transaction().await?;
        let active_model: entity::ActiveModel = item.into();
        let model = active_model.insert(open(&guard)?).await?;

        tracing::debug!(item_id = model.id, "Staged catalogue item insert");
        Ok(model.into())
    }

    async fn update(&self, item: CatalogueItem) -> CatalogueResult<CatalogueItem> {
        let guard = self.transaction().await?;
        let active_model: entity::ActiveModel = item.into();
        let model = active_model.update(open(&guard)?).await?;

        tracing::debug!(item_id = model.id, "Staged catalogue item update");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> CatalogueResult<bool> {
        if self.get_by_id_for_update(id).await?.is_none() {
            return Ok(false);
        }

        let guard = self.transaction().await?;
        entity::Entity::delete_by_id(id)
            .exec(open(&guard)?)
            .await?;

        tracing::debug!(item_id = id, "Staged catalogue item delete");
        Ok(true)
    }

    async fn exists(&self, id: i64) -> CatalogueResult<bool> {
        let guard = self.txn.lock().await;
        let count = match guard.as_ref() {
            Some(txn) => count_by_id(txn, id).await?,
            None => count_by_id(&self.db, id).await?,
        };
        Ok(count > 0)
    }
}

#[async_trait]
impl UnitOfWork for PgCatalogueRepository {
    async fn commit(&self) -> CatalogueResult<()> {
        let txn = self.txn.lock().await.take();
        if let Some(txn) = txn {
            txn.commit().await?;
            tracing::debug!("Committed unit-of-work transaction");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    use crate::models::Genre;

    fn model(id: i64, title: &str) -> entity::Model {
        let now = Utc::now();
        entity::Model {
            id,
            title: title.to_string(),
            publisher: "Nintendo".to_string(),
            developer: "Nintendo EPD".to_string(),
            release_date: now.into(),
            genre: Genre::Platformer,
            price: Decimal::new(5999, 2),
            description: String::new(),
            rating: 10,
            cover_image_url: String::new(),
            is_active: true,
            created_at: now.into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_reads_from_pool_without_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Odyssey")]])
            .into_connection();

        let repo = PgCatalogueRepository::new(db);
        let item = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(item.title, "Odyssey");
        assert_eq!(item.genre, Genre::Platformer);

        // Nothing staged, so commit must not touch the connection
        repo.commit().await.unwrap();
    }

    fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
    }

    #[tokio::test]
    async fn test_get_paged_past_the_end_skips_window_query() {
        // Only the count is queued; a windowed query would hit an empty buffer
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(3)]])
            .into_connection();

        let repo = PgCatalogueRepository::new(db);
        let (items, total) = repo.get_paged(u64::MAX, 50).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_get_paged_within_range_reads_window() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(2)]])
            .append_query_results([vec![model(2, "Newer"), model(1, "Older")]])
            .into_connection();

        let repo = PgCatalogueRepository::new(db);
        let (items, total) = repo.get_paged(1, 10).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Newer");
    }

    #[tokio::test]
    async fn test_update_returns_row_as_stored() {
        let mut stored = model(4, "Stored");
        stored.price = Decimal::new(1000, 2);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored]])
            .into_connection();

        let repo = PgCatalogueRepository::new(db);
        let mut item: CatalogueItem = model(4, "Stored").into();
        item.price = Decimal::new(99999, 4);

        let updated = repo.update(item).await.unwrap();
        assert_eq!(updated.price, Decimal::new(1000, 2));
        assert!(repo.txn.lock().await.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_row_returns_false() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let repo = PgCatalogueRepository::new(db);
        assert!(!repo.delete(404).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_existing_row_locks_then_deletes_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(5, "Wonder")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PgCatalogueRepository::new(db);
        assert!(repo.delete(5).await.unwrap());
        assert!(repo.txn.lock().await.is_some());

        repo.commit().await.unwrap();
        assert!(repo.txn.lock().await.is_none());
    }
}
