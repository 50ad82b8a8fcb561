use axum::{Router, middleware, routing::get};
use axum_helpers::server::health_router;
use domain_events::{EventService, PgEventRepository};

use crate::state::AppState;

pub mod health;

/// Every route the service exposes, each sub-router with its state applied.
///
/// Domain routes are absolute (`/events`, `/attendees/...`). Only they are
/// measured by the HTTP metrics middleware, so probes and scrapes stay out
/// of the request counters.
pub fn routes(state: &AppState) -> Router {
    let events = EventService::new(PgEventRepository::new(state.db.clone()))
        .with_public_base_url(state.config.public_base_url.clone());

    domain_events::handlers::router(events)
        .route_layer(middleware::from_fn(observability::metrics_middleware))
        .route("/metrics", get(observability::metrics_handler))
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()))
}

/// `/ready` with real dependency checks.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_config::server::ServerConfig;
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;

    fn state_with(db: MockDatabase) -> AppState {
        AppState {
            config: Config {
                app: core_config::app_info!(),
                database: PostgresConfig::new("postgres://localhost/passin"),
                server: ServerConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
                public_base_url: None,
            },
            db: db.into_connection(),
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_package() {
        let state = state_with(MockDatabase::new(DatabaseBackend::Postgres));

        let (status, body) = get_json(routes(&state), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "pass_in_api");
    }

    #[tokio::test]
    async fn test_ready_is_unavailable_when_database_fails() {
        let state = state_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection refused".into())]),
        );

        let (status, body) = get_json(routes(&state), "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_metrics_endpoint_is_mounted() {
        let state = state_with(MockDatabase::new(DatabaseBackend::Postgres));

        let response = routes(&state)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_documented_router_falls_back_to_not_found() {
        let state = state_with(MockDatabase::new(DatabaseBackend::Postgres));
        let app = axum_helpers::create_router::<crate::openapi::ApiDoc>(routes(&state)).unwrap();

        let (status, body) = get_json(app, "/nowhere").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found");
    }
}
