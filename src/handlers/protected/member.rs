// handlers/protected/member.rs - /api/project/member

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query, State,
    },
    Json,
};

use crate::gateway::Row;
use crate::middleware::ApiResult;
use crate::models::{AddMemberRequest, MemberListQuery, UpdateMemberRequest};
use crate::routes::AppState;
use crate::services::{members, Caller};

/// POST /api/project/member - add a user (by email) to a project
pub async fn post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<AddMemberRequest>, JsonRejection>,
) -> ApiResult<Vec<Row>> {
    let Json(request) = payload?;
    members::add_member(state.gateway.as_ref(), &caller, request).await
}

/// PUT /api/project/member - (de)activate a membership
pub async fn put(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<UpdateMemberRequest>, JsonRejection>,
) -> ApiResult<Vec<Row>> {
    let Json(request) = payload?;
    members::update_member(state.gateway.as_ref(), &caller, request).await
}

/// GET /api/project/member?id=<projectId>
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: Result<Query<MemberListQuery>, QueryRejection>,
) -> ApiResult<Vec<Row>> {
    let Query(query) = query?;
    members::list_members(state.gateway.as_ref(), &caller, query.project_id).await
}
