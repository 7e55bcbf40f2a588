use std::sync::Arc;

use crate::commands::{
    CreateCatalogueItemHandler, DeleteCatalogueItemHandler, UpdateCatalogueItemHandler,
};
use crate::error::{CatalogueError, CatalogueResult};
use crate::models::{
    CatalogueItem, CatalogueItemDto, CreateCatalogueItem, PagedResult, UpdateCatalogueItem,
};
use crate::pagination::PaginationParameters;
use crate::queries::{GetCatalogueItemByIdHandler, ListCatalogueItemsHandler};
use crate::repository::{CatalogueRepository, CatalogueStore};

/// Entry point for catalogue operations; opens one store scope per call.
///
/// Create and update input is validated where it is extracted
/// (`ValidatedJson` in the router), not again here.
#[derive(Clone)]
pub struct CatalogueService<S: CatalogueStore> {
    store: Arc<S>,
}

impl<S: CatalogueStore> CatalogueService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn create_item(&self, input: CreateCatalogueItem) -> CatalogueResult<CatalogueItemDto> {
        let scope = self.store.scope();
        CreateCatalogueItemHandler::new(&scope, &scope)
            .handle(input)
            .await
    }

    pub async fn list_items(
        &self,
        params: PaginationParameters,
    ) -> CatalogueResult<PagedResult<CatalogueItemDto>> {
        let scope = self.store.scope();
        ListCatalogueItemsHandler::new(&scope).handle(params).await
    }

    pub async fn get_item(&self, id: i64) -> CatalogueResult<CatalogueItemDto> {
        let scope = self.store.scope();
        GetCatalogueItemByIdHandler::new(&scope)
            .handle(id)
            .await?
            .ok_or(CatalogueError::NotFound(id))
    }

    pub async fn update_item(
        &self,
        id: i64,
        input: UpdateCatalogueItem,
    ) -> CatalogueResult<CatalogueItemDto> {
        let scope = self.store.scope();
        UpdateCatalogueItemHandler::new(&scope, &scope)
            .handle(id, input)
            .await?
            .ok_or(CatalogueError::NotFound(id))
    }

    pub async fn delete_item(&self, id: i64) -> CatalogueResult<()> {
        let scope = self.store.scope();
        let deleted = DeleteCatalogueItemHandler::new(&scope, &scope)
            .handle(id)
            .await?;

        if !deleted {
            return Err(CatalogueError::NotFound(id));
        }

        Ok(())
    }

    /// Every active item, newest first, unpaged
    pub async fn list_all_active(&self) -> CatalogueResult<Vec<CatalogueItem>> {
        self.store.scope().get_all().await
    }

    pub async fn exists(&self, id: i64) -> CatalogueResult<bool> {
        self.store.scope().exists(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use crate::repository::InMemoryCatalogueStore;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn create_input(title: &str) -> CreateCatalogueItem {
        CreateCatalogueItem {
            title: title.to_string(),
            publisher: "Publisher".to_string(),
            developer: "Developer".to_string(),
            release_date: Utc::now(),
            genre: Genre::Racing,
            price: Decimal::new(3999, 2),
            description: String::new(),
            rating: 6,
            cover_image_url: String::new(),
        }
    }

    fn update_input(id: i64, is_active: bool) -> UpdateCatalogueItem {
        UpdateCatalogueItem {
            id,
            title: "Renamed".to_string(),
            publisher: "Publisher".to_string(),
            developer: "Developer".to_string(),
            release_date: Utc::now(),
            genre: Genre::Racing,
            price: Decimal::new(2999, 2),
            description: String::new(),
            rating: 6,
            cover_image_url: String::new(),
            is_active,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = CatalogueService::new(InMemoryCatalogueStore::new());

        let created = service.create_item(create_input("Gran Turismo")).await.unwrap();
        let fetched = service.get_item(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert!(service.exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_items_are_not_found() {
        let service = CatalogueService::new(InMemoryCatalogueStore::new());

        assert!(matches!(service.get_item(1).await, Err(CatalogueError::NotFound(1))));
        assert!(matches!(
            service.update_item(1, update_input(1, true)).await,
            Err(CatalogueError::NotFound(1))
        ));
        assert!(matches!(service.delete_item(1).await, Err(CatalogueError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_deactivated_item_is_hidden_from_listing_only() {
        let service = CatalogueService::new(InMemoryCatalogueStore::new());
        let kept = service.create_item(create_input("Kept")).await.unwrap();
        let hidden = service.create_item(create_input("Hidden")).await.unwrap();

        service
            .update_item(hidden.id, update_input(hidden.id, false))
            .await
            .unwrap();

        let page = service.list_items(PaginationParameters::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, kept.id);

        let all = service.list_all_active().await.unwrap();
        assert_eq!(all.len(), 1);

        let fetched = service.get_item(hidden.id).await.unwrap();
        assert!(!fetched.is_active);
    }

    #[tokio::test]
    async fn test_delete_removes_item() {
        let service = CatalogueService::new(InMemoryCatalogueStore::new());
        let created = service.create_item(create_input("Temporary")).await.unwrap();

        service.delete_item(created.id).await.unwrap();
        assert!(!service.exists(created.id).await.unwrap());
    }
}
