use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{CatalogueError, CatalogueResult};
use crate::models::{
    CatalogueItemDto, CreateCatalogueItem, ListCatalogueQuery, PagedResult, UpdateCatalogueItem,
};
use crate::pagination::PaginationParameters;
use crate::repository::CatalogueStore;
use crate::service::CatalogueService;

const TAG: &str = "Catalogue";

/// Prefix under which the application mounts [`router`].
pub const BASE_PATH: &str = "/api/catalogue";

/// OpenAPI documentation for the catalogue API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(CatalogueItemDto, CreateCatalogueItem, UpdateCatalogueItem),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Video game catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalogue router with all HTTP endpoints
pub fn router<S: CatalogueStore>(service: CatalogueService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// List active items, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListCatalogueQuery),
    responses(
        (status = 200, description = "One page of active items", body = PagedResult<CatalogueItemDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<S: CatalogueStore>(
    State(service): State<Arc<CatalogueService<S>>>,
    Query(query): Query<ListCatalogueQuery>,
) -> CatalogueResult<Json<PagedResult<CatalogueItemDto>>> {
    let params = PaginationParameters::from_query(query.page_number, query.page_size);
    let page = service.list_items(params).await?;
    Ok(Json(page))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCatalogueItem,
    responses(
        (status = 201, description = "Item created", body = CatalogueItemDto,
            headers(("Location" = String, description = "URL of the new item"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<S: CatalogueStore>(
    State(service): State<Arc<CatalogueService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateCatalogueItem>,
) -> CatalogueResult<impl IntoResponse> {
    let item = service.create_item(input).await?;

    tracing::info!(item_id = item.id, title = %item.title, "Created video game");

    let location = format!("{}/{}", BASE_PATH, item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// Get an item by ID, active or not
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = CatalogueItemDto),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<S: CatalogueStore>(
    State(service): State<Arc<CatalogueService<S>>>,
    IdPath(id): IdPath,
) -> CatalogueResult<Json<CatalogueItemDto>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Replace every mutable field of an item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID, must match the body")
    ),
    request_body = UpdateCatalogueItem,
    responses(
        (status = 200, description = "Item updated", body = CatalogueItemDto),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<S: CatalogueStore>(
    State(service): State<Arc<CatalogueService<S>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCatalogueItem>,
) -> CatalogueResult<Json<CatalogueItemDto>> {
    if input.id != id {
        tracing::warn!(path_id = id, body_id = input.id, "ID mismatch in update request");
        return Err(CatalogueError::BadRequest(
            "ID in URL does not match ID in request body".to_string(),
        ));
    }

    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Permanently delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<S: CatalogueStore>(
    State(service): State<Arc<CatalogueService<S>>>,
    IdPath(id): IdPath,
) -> CatalogueResult<impl IntoResponse> {
    service.delete_item(id).await?;

    tracing::info!(item_id = id, "Deleted video game");
    Ok(StatusCode::NO_CONTENT)
}
