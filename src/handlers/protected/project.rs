// handlers/protected/project.rs - /api/project

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use crate::gateway::Row;
use crate::middleware::ApiResult;
use crate::models::{CreateProjectRequest, ProjectView, UpdateProjectRequest};
use crate::routes::AppState;
use crate::services::{projects, Caller};

/// POST /api/project - create a project (Admin or Manager)
pub async fn post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<Vec<Row>> {
    let Json(request) = payload?;
    projects::create_project(state.gateway.as_ref(), &caller, request).await
}

/// PUT /api/project - rename or (de)activate a project (Admin or creator)
pub async fn put(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> ApiResult<Vec<Row>> {
    let Json(request) = payload?;
    projects::update_project(state.gateway.as_ref(), &caller, request).await
}

/// GET /api/project - the caller's projects with members nested
pub async fn get(State(state): State<AppState>, Extension(caller): Extension<Caller>) -> ApiResult<Vec<ProjectView>> {
    projects::list_projects(state.gateway.as_ref(), &caller).await
}
