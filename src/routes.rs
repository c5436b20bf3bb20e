use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, routing::get, Router};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::{ApiConfig, AppConfig};
use crate::gateway::ProcedureGateway;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ProcedureGateway>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ProcedureGateway>, jwt: JwtKeys) -> Self {
        Self { gateway, jwt }
    }
}

/// All routes, with authentication applied to `/api/*`
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(project_routes(state.clone()))
        .with_state(state)
}

fn project_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/project",
            get(protected::project::get)
                .post(protected::project::post)
                .put(protected::project::put),
        )
        .route(
            "/api/project/member",
            get(protected::member::get)
                .post(protected::member::post)
                .put(protected::member::put),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

/// Router with the deployment layers from configuration applied
pub fn configured_app(state: AppState, config: &AppConfig) -> Router {
    let mut router = app(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }

    if let Some(trace) = request_trace(&config.api) {
        router = router.layer(trace);
    }

    router
}

/// Per-request tracing spans, when request logging is enabled
fn request_trace(api: &ApiConfig) -> Option<TraceLayer<SharedClassifier<ServerErrorsAsFailures>>> {
    api.enable_request_logging.then(TraceLayer::new_for_http)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGateway;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(Arc::new(ScriptedGateway::new()), JwtKeys::new("routes-test-secret"))
    }

    #[test]
    fn request_logging_follows_config() {
        assert!(request_trace(&AppConfig::development().api).is_some());
        assert!(request_trace(&AppConfig::production().api).is_none());

        let mut config = AppConfig::production();
        config.api.enable_request_logging = true;
        assert!(request_trace(&config.api).is_some());
    }

    #[tokio::test]
    async fn production_router_serves_without_request_logging() {
        let app = configured_app(state(), &AppConfig::production());

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn allowed_origin_gets_cors_headers() {
        let app = configured_app(state(), &AppConfig::development());

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = app(state());

        let request = Request::builder().uri("/api/project").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
