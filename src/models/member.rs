use serde::{Deserialize, Serialize};

use super::column;

/// POST /api/project/member body; `id` is the project id
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub email: String,
    #[serde(rename = "id")]
    pub project_id: i64,
}

/// PUT /api/project/member body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub project_id: i64,
    pub member_id: i64,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// GET /api/project/member query
#[derive(Debug, Clone, Deserialize)]
pub struct MemberListQuery {
    #[serde(rename = "id")]
    pub project_id: i64,
}

/// Row returned by `usp_checkMember`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberExistence {
    #[serde(default, deserialize_with = "column::flag")]
    pub is_member_exists: bool,
}

/// Member entry nested under a project view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub project_id: i64,
    pub member_id: Option<i64>,
    pub member_name: Option<String>,
}
