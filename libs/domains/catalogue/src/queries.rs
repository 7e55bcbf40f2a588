//! Read-side handlers. They never stage or commit anything.

use crate::error::CatalogueResult;
use crate::models::{CatalogueItemDto, PagedResult};
use crate::pagination::PaginationParameters;
use crate::repository::CatalogueRepository;

pub struct ListCatalogueItemsHandler<'a, R> {
    repository: &'a R,
}

impl<'a, R: CatalogueRepository> ListCatalogueItemsHandler<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        params: PaginationParameters,
    ) -> CatalogueResult<PagedResult<CatalogueItemDto>> {
        let (items, total_count) = self
            .repository
            .get_paged(params.page_number(), params.page_size())
            .await?;

        Ok(PagedResult::new(
            items.into_iter().map(Into::into).collect(),
            params.page_number(),
            params.page_size(),
            total_count,
        ))
    }
}

pub struct GetCatalogueItemByIdHandler<'a, R> {
    repository: &'a R,
}

impl<'a, R: CatalogueRepository> GetCatalogueItemByIdHandler<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: i64) -> CatalogueResult<Option<CatalogueItemDto>> {
        let item = self.repository.get_by_id(id).await?;
        Ok(item.map(Into::into))
    }
}
