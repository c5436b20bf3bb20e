use tracing::{info, warn};

use crate::error::ApiError;
use crate::gateway::{procedures, ProcedureCall, ProcedureGateway, Row};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{
    CreateProjectRequest, ProjectExistence, ProjectOwner, ProjectRow, ProjectView, UpdateProjectRequest,
};

use super::{call_for_rows, can_create_project, can_mutate_project, group_project_rows, Caller};

/// Create a project. The name check runs before the role check, so a
/// duplicate name is reported as a conflict whoever the caller is.
pub async fn create_project(
    gateway: &dyn ProcedureGateway,
    caller: &Caller,
    request: CreateProjectRequest,
) -> ApiResult<Vec<Row>> {
    let existing = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::CHECK_PROJECTS).input("projectName", request.project_name.as_str()),
        "Project existence check failed",
    )
    .await?;

    let exists = existing
        .first_as::<ProjectExistence>(procedures::CHECK_PROJECTS)?
        .map(|row| row.is_project_exists)
        .unwrap_or(false);
    if exists {
        warn!("Project name '{}' already taken", request.project_name);
        return Err(ApiError::conflict("Project already exists"));
    }

    if !can_create_project(caller) {
        warn!("Caller {} ({:?}) may not create projects", caller.user_id, caller.role());
        return Err(ApiError::not_permitted("Only Admin or Manager can create a project"));
    }

    let inserted = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::INSERT_PROJECT)
            .input("name", request.project_name.as_str())
            .input("createdBy", caller.user_id)
            .input("isActive", true),
        "Project not added successfully",
    )
    .await?;

    info!("Project '{}' created by {}", request.project_name, caller.user_id);
    Ok(ApiResponse::created(inserted.into_rows()).with_message("Project created successfully"))
}

/// Rename a project or toggle `isActive`. Deleting is `isActive = false`.
pub async fn update_project(
    gateway: &dyn ProcedureGateway,
    caller: &Caller,
    request: UpdateProjectRequest,
) -> ApiResult<Vec<Row>> {
    let found = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::CHECK_AND_GET_PROJECT).input("projectId", request.id),
        "Project lookup failed",
    )
    .await?;

    let Some(project) = found.first_as::<ProjectOwner>(procedures::CHECK_AND_GET_PROJECT)? else {
        warn!("Project {} does not exist", request.id);
        return Err(ApiError::not_found("Project does not exist"));
    };

    if !can_mutate_project(caller, project.created_by) {
        warn!(
            "Caller {} may not update project {} owned by {}",
            caller.user_id, request.id, project.created_by
        );
        return Err(ApiError::not_permitted(
            "Only Admin or the project creator can update the project",
        ));
    }

    let updated = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::UPDATE_PROJECT)
            .input("id", request.id)
            .input("updatedBy", caller.user_id)
            .input("name", request.name)
            .input("isActive", request.is_active),
        "Project not updated successfully",
    )
    .await?;

    if updated.is_empty() {
        warn!("Update of project {} affected no rows", request.id);
        return Err(ApiError::not_found("No project record found for id"));
    }

    info!("Project {} updated by {}", request.id, caller.user_id);
    Ok(ApiResponse::success(updated.into_rows()).with_message("Project updated successfully"))
}

/// Projects visible to the caller, each with its members nested
pub async fn list_projects(gateway: &dyn ProcedureGateway, caller: &Caller) -> ApiResult<Vec<ProjectView>> {
    let rows = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::GET_PROJECTS_BY_USER_ID).input("userId", caller.user_id),
        "Project listing failed",
    )
    .await?;

    if rows.is_empty() {
        warn!("No projects visible to {}", caller.user_id);
        return Err(ApiError::not_found("No data found"));
    }

    let rows = rows.rows_as::<ProjectRow>(procedures::GET_PROJECTS_BY_USER_ID)?;
    let views = group_project_rows(rows);

    info!("Listed {} projects for {}", views.len(), caller.user_id);
    Ok(ApiResponse::success(views))
}
