use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::column;
use super::member::MemberSummary;

/// POST /api/project body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub project_name: String,
}

/// PUT /api/project body. Setting `isActive` to false is how projects are deleted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Row returned by `usp_checkProjects`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExistence {
    #[serde(default, deserialize_with = "column::flag")]
    pub is_project_exists: bool,
}

/// The part of a project row needed for authorization
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOwner {
    #[serde(default)]
    pub id: Option<i64>,
    pub created_by: i64,
}

/// Flat row from `usp_getProjectsByUserId`: project columns repeated once
/// per member, member columns absent when the project has none
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "column::timestamp")]
    pub created_date_time: Option<NaiveDateTime>,
    pub created_by: i64,
    #[serde(default)]
    pub updated_by: Option<i64>,
    #[serde(deserialize_with = "column::flag")]
    pub is_active: bool,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
}

/// A project with its members nested, as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: i64,
    pub name: String,
    pub created_date_time: Option<NaiveDateTime>,
    pub created_by: i64,
    pub updated_by: Option<i64>,
    pub is_active: bool,
    pub members: Vec<MemberSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_row_without_member_columns() {
        let row: ProjectRow = serde_json::from_value(json!({
            "id": 2,
            "name": "Gemini",
            "createdDateTime": "2024-03-01T09:30:00",
            "createdBy": 5,
            "updatedBy": null,
            "isActive": true
        }))
        .unwrap();

        assert_eq!(row.project_id, None);
        assert_eq!(row.member_id, None);
        assert_eq!(
            row.created_date_time.unwrap().to_string(),
            "2024-03-01 09:30:00"
        );
    }

    #[test]
    fn decodes_bit_columns_and_offset_timestamps() {
        let row: ProjectRow = serde_json::from_value(json!({
            "id": 1,
            "name": "Apollo",
            "createdDateTime": "2024-03-01T09:30:00+02:00",
            "createdBy": 5,
            "isActive": 1,
            "projectId": 1,
            "memberId": 8,
            "memberName": "user2@planetx.com"
        }))
        .unwrap();

        assert!(row.is_active);
        assert_eq!(row.member_id, Some(8));
        assert_eq!(
            row.created_date_time.unwrap().to_string(),
            "2024-03-01 07:30:00"
        );
    }

    #[test]
    fn existence_flag_accepts_integers() {
        let yes: ProjectExistence = serde_json::from_value(json!({ "isProjectExists": 1 })).unwrap();
        let no: ProjectExistence = serde_json::from_value(json!({ "isProjectExists": 0 })).unwrap();
        let missing: ProjectExistence = serde_json::from_value(json!({})).unwrap();
        assert!(yes.is_project_exists);
        assert!(!no.is_project_exists);
        assert!(!missing.is_project_exists);
    }

    #[test]
    fn view_serializes_camel_case_with_empty_members() {
        let view = ProjectView {
            id: 2,
            name: "Gemini".to_string(),
            created_date_time: None,
            created_by: 5,
            updated_by: None,
            is_active: true,
            members: vec![],
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["createdBy"], 5);
        assert_eq!(value["isActive"], true);
        assert_eq!(value["members"], json!([]));
    }
}
