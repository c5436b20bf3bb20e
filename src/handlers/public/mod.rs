// handlers/public/mod.rs - Unauthenticated endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::routes::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Project Roster API",
            "version": version,
            "description": "Project and membership management backed by stored procedures",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "project": "/api/project (protected - POST create, PUT update, GET list own)",
                "member": "/api/project/member (protected - POST add, PUT update, GET ?id=<projectId>)",
            }
        }
    }))
}

/// GET /health - gateway round trip
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.gateway.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
