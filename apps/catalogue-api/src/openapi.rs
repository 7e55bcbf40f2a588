use utoipa::OpenApi;

/// Root API documentation; domain docs are nested under their mount points.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Video Game Catalogue API",
        description = "Create, browse, update and delete video game catalogue entries"
    ),
    nest(
        (path = domain_catalogue::handlers::BASE_PATH, api = domain_catalogue::handlers::ApiDoc),
    )
)]
pub struct ApiDoc;
