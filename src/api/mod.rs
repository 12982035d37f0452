// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

use utoipa::OpenApi;

/// OpenAPI document for the service, served through Swagger UI at `/docs`.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::get_suggestions,
        crate::handlers::post_suggestions,
    ),
    components(schemas(
        crate::models::SuggestionRequest,
        crate::models::SuggestionResponse,
    )),
    tags(
        (name = "cuil", description = "CUIL/CUIT suggestion endpoints")
    )
)]
pub struct ApiDoc;
