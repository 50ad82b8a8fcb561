use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "pass.in API",
        version = "0.1.0",
        description = "Event registration, attendee badges and check-in"
    ),
    components(schemas(axum_helpers::ErrorResponse))
)]
struct ServiceDoc;

/// Served at `/api-docs/openapi.json` and rendered under `/docs`.
///
/// Domain paths are already absolute, so they are merged instead of nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        ServiceDoc::openapi().merge_from(domain_events::ApiDoc::openapi())
    }
}
