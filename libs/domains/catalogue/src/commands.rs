//! Write-side handlers. Each one owns the commit of its scope.

use chrono::Utc;

use crate::error::CatalogueResult;
use crate::models::{CatalogueItemDto, CreateCatalogueItem, NewCatalogueItem, UpdateCatalogueItem};
use crate::repository::{CatalogueRepository, UnitOfWork};

pub struct CreateCatalogueItemHandler<'a, R, U> {
    repository: &'a R,
    unit_of_work: &'a U,
}

impl<'a, R: CatalogueRepository, U: UnitOfWork> CreateCatalogueItemHandler<'a, R, U> {
    pub fn new(repository: &'a R, unit_of_work: &'a U) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// Adds an active item stamped with the current time and commits it.
    pub async fn handle(&self, input: CreateCatalogueItem) -> CatalogueResult<CatalogueItemDto> {
        let item = NewCatalogueItem::from_create(input, Utc::now());
        let created = self.repository.add(item).await?;
        self.unit_of_work.commit().await?;

        Ok(created.into())
    }
}

pub struct UpdateCatalogueItemHandler<'a, R, U> {
    repository: &'a R,
    unit_of_work: &'a U,
}

impl<'a, R: CatalogueRepository, U: UnitOfWork> UpdateCatalogueItemHandler<'a, R, U> {
    pub fn new(repository: &'a R, unit_of_work: &'a U) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// Full replacement of the mutable fields of `id`.
    ///
    /// Returns `None` without committing when the item does not exist.
    pub async fn handle(
        &self,
        id: i64,
        input: UpdateCatalogueItem,
    ) -> CatalogueResult<Option<CatalogueItemDto>> {
        let Some(mut item) = self.repository.get_by_id_for_update(id).await? else {
            return Ok(None);
        };

        item.apply_update(input, Utc::now());
        let updated = self.repository.update(item).await?;
        self.unit_of_work.commit().await?;

        Ok(Some(updated.into()))
    }
}

pub struct DeleteCatalogueItemHandler<'a, R, U> {
    repository: &'a R,
    unit_of_work: &'a U,
}

impl<'a, R: CatalogueRepository, U: UnitOfWork> DeleteCatalogueItemHandler<'a, R, U> {
    pub fn new(repository: &'a R, unit_of_work: &'a U) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// Hard delete. `false` (and no commit) when the item does not exist.
    pub async fn handle(&self, id: i64) -> CatalogueResult<bool> {
        if !self.repository.delete(id).await? {
            return Ok(false);
        }

        self.unit_of_work.commit().await?;
        Ok(true)
    }
}
