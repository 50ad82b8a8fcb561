use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, create_permissive_cors_layer, security_headers};
use axum::{Router, http::HeaderValue, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Wrap API routes with documentation UIs and cross-cutting middleware.
///
/// - Swagger UI at `/docs`, ReDoc at `/redoc`, RapiDoc at `/rapidoc`, Scalar at `/scalar`,
///   all generated from `T` and served from [`OPENAPI_JSON_PATH`]
/// - request tracing, security headers, CORS and response compression
/// - `{"message":"Route not found"}` fallback
///
/// Routes are mounted at the root; `apis` must already have its state applied.
///
/// CORS is unrestricted unless `CORS_ALLOWED_ORIGIN` names a single origin.
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is set to something that is not a valid header value.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let router = Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_from_env()?)
        .layer(CompressionLayer::new());

    Ok(router)
}

fn cors_from_env() -> io::Result<CorsLayer> {
    match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(origin) if !origin.trim().is_empty() => {
            let value = origin.trim().parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
                )
            })?;
            info!(origin = %origin.trim(), "CORS restricted to a single origin");
            Ok(create_cors_layer(value))
        }
        _ => Ok(create_permissive_cors_layer()),
    }
}

/// Serve `router` until SIGINT/SIGTERM, drain in-flight requests, then run
/// `cleanup` bounded by `shutdown_timeout`.
///
/// Cleanup starts only after every in-flight request has completed.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("HTTP server running at http://{}", listener.local_addr()?);

    serve_then_cleanup(
        listener,
        router,
        async move { coordinator.wait_for_signal().await },
        shutdown_timeout,
        cleanup,
    )
    .await
}

async fn serve_then_cleanup<S, F>(
    listener: tokio::net::TcpListener,
    router: Router,
    shutdown: S,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    info!(timeout = ?shutdown_timeout, "Connections drained, starting cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => tracing::warn!(
            timeout = ?shutdown_timeout,
            "Cleanup exceeded timeout, forcing shutdown"
        ),
    }

    serve_result
}
