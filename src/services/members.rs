use tracing::{info, warn};

use crate::error::ApiError;
use crate::gateway::{procedures, ProcedureCall, ProcedureGateway, Row};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{AddMemberRequest, MemberExistence, ProjectOwner, UpdateMemberRequest, UserRecord};

use super::{call_for_rows, can_mutate_project, Caller};

const NOT_PERMITTED: &str = "Only Admin or the project creator can change project members";

/// Look up the creator of a project, or fail with "No project found"
async fn project_owner(gateway: &dyn ProcedureGateway, project_id: i64) -> Result<ProjectOwner, ApiError> {
    let found = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::GET_PROJECTS_BY_ID).input("id", project_id),
        "Project lookup failed",
    )
    .await?;

    found
        .first_as::<ProjectOwner>(procedures::GET_PROJECTS_BY_ID)?
        .ok_or_else(|| {
            warn!("Project {} not found", project_id);
            ApiError::not_found("No project found")
        })
}

/// Add the user registered under `email` to a project
pub async fn add_member(
    gateway: &dyn ProcedureGateway,
    caller: &Caller,
    request: AddMemberRequest,
) -> ApiResult<Vec<Row>> {
    let users = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::CHECK_AND_GET_USER).input("email", request.email.as_str()),
        "User lookup failed",
    )
    .await?;

    let Some(user) = users.first_as::<UserRecord>(procedures::CHECK_AND_GET_USER)? else {
        warn!("No user registered as {}", request.email);
        return Err(ApiError::not_found("User does not exist"));
    };

    let membership = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::CHECK_MEMBER)
            .input("projectId", request.project_id)
            .input("memberId", user.id),
        "Member existence check failed",
    )
    .await?;

    let already_member = membership
        .first_as::<MemberExistence>(procedures::CHECK_MEMBER)?
        .map(|row| row.is_member_exists)
        .unwrap_or(false);
    if already_member {
        warn!("User {} is already a member of project {}", user.id, request.project_id);
        return Err(ApiError::conflict("Member already exists in project"));
    }

    let project = project_owner(gateway, request.project_id).await?;
    if !can_mutate_project(caller, project.created_by) {
        warn!(
            "Caller {} may not add members to project {} owned by {}",
            caller.user_id, request.project_id, project.created_by
        );
        return Err(ApiError::not_permitted(NOT_PERMITTED));
    }

    let inserted = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::INSERT_PROJECT_MEMBER)
            .input("projectId", request.project_id)
            .input("memberId", user.id)
            .input("memberMail", user.email.as_str())
            .input("createdBy", caller.user_id)
            .input("isActive", true),
        "Member not added successfully",
    )
    .await?;

    info!("User {} added to project {} by {}", user.id, request.project_id, caller.user_id);
    Ok(ApiResponse::created(inserted.into_rows()).with_message("Member added successfully"))
}

/// Toggle a membership, addressed by (projectId, memberId)
pub async fn update_member(
    gateway: &dyn ProcedureGateway,
    caller: &Caller,
    request: UpdateMemberRequest,
) -> ApiResult<Vec<Row>> {
    let project = project_owner(gateway, request.project_id).await?;
    if !can_mutate_project(caller, project.created_by) {
        warn!(
            "Caller {} may not update members of project {} owned by {}",
            caller.user_id, request.project_id, project.created_by
        );
        return Err(ApiError::not_permitted(NOT_PERMITTED));
    }

    let updated = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::UPDATE_PROJECT_MEMBER)
            .input("memberId", request.member_id)
            .input("projectId", request.project_id)
            .input("updatedBy", caller.user_id)
            .input("isActive", request.is_active),
        "Member not updated successfully",
    )
    .await?;

    if updated.is_empty() {
        warn!(
            "No membership for member {} in project {}",
            request.member_id, request.project_id
        );
        return Err(ApiError::not_found("No member record found for memberId and projectId"));
    }

    info!(
        "Member {} of project {} updated by {}",
        request.member_id, request.project_id, caller.user_id
    );
    Ok(ApiResponse::success(updated.into_rows()).with_message("Member updated successfully"))
}

/// Members of a project, as stored. Any authenticated caller may list.
pub async fn list_members(gateway: &dyn ProcedureGateway, caller: &Caller, project_id: i64) -> ApiResult<Vec<Row>> {
    let members = call_for_rows(
        gateway,
        ProcedureCall::new(procedures::GET_MEMBER_BY_PROJECT_ID).input("projectId", project_id),
        "Member listing failed",
    )
    .await?;

    if members.is_empty() {
        warn!("No members found for project {}", project_id);
        return Err(ApiError::not_found("No project member data found"));
    }

    info!(
        "Listed {} members of project {} for {}",
        members.rows().len(),
        project_id,
        caller.user_id
    );
    Ok(ApiResponse::success(members.into_rows()))
}
