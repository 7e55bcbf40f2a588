use axum::Router;
use domain_catalogue::{CatalogueService, PgCatalogueStore, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let store = PgCatalogueStore::new(state.db.clone());
    let service = CatalogueService::new(store);
    handlers::router(service)
}
