//! Catalogue Domain
//!
//! Video game catalogue: create, list (paged), get, update and delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │      Handlers       │  ← HTTP endpoints + OpenAPI
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐
//! │       Service       │  ← one store scope per call
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐
//! │ Commands / Queries  │  ← timestamps, active flag, commit
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐
//! │ Repository + UoW    │  ← staged changes, atomic commit
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐
//! │       Models        │  ← entity, DTOs, Genre, paging
//! └─────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalogue::{handlers, CatalogueService, InMemoryCatalogueStore};
//!
//! let service = CatalogueService::new(InMemoryCatalogueStore::new());
//! let router = handlers::router(service);
//! ```

pub mod commands;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod queries;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogueError, CatalogueResult};
pub use models::{
    CatalogueItem, CatalogueItemDto, CreateCatalogueItem, Genre, ListCatalogueQuery,
    NewCatalogueItem, PagedResult, UpdateCatalogueItem,
};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PaginationParameters};
pub use postgres::{PgCatalogueRepository, PgCatalogueStore};
pub use repository::{
    CatalogueRepository, CatalogueStore, InMemoryCatalogueRepository, InMemoryCatalogueStore,
    UnitOfWork,
};
pub use service::CatalogueService;
