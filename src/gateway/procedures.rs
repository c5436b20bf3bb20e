// Stored procedure names and their parameter lists

pub const CHECK_PROJECTS: &str = "usp_checkProjects";
pub const INSERT_PROJECT: &str = "usp_insertProject";
pub const CHECK_AND_GET_PROJECT: &str = "usp_checkAndGetProject";
pub const UPDATE_PROJECT: &str = "usp_updateProject";
pub const GET_PROJECTS_BY_USER_ID: &str = "usp_getProjectsByUserId";
pub const CHECK_AND_GET_USER: &str = "usp_checkAndGetUser";
pub const CHECK_MEMBER: &str = "usp_checkMember";
pub const GET_PROJECTS_BY_ID: &str = "usp_getProjectsById";
pub const INSERT_PROJECT_MEMBER: &str = "usp_insertProjectMember";
pub const UPDATE_PROJECT_MEMBER: &str = "usp_updateProjectMember";
pub const GET_MEMBER_BY_PROJECT_ID: &str = "usp_getMemberByProjectId";

/// Every procedure the service calls, with its parameters in call order
pub const CATALOG: &[(&str, &[&str])] = &[
    (CHECK_PROJECTS, &["projectName"]),
    (INSERT_PROJECT, &["name", "createdBy", "isActive"]),
    (CHECK_AND_GET_PROJECT, &["projectId"]),
    (UPDATE_PROJECT, &["id", "updatedBy", "name", "isActive"]),
    (GET_PROJECTS_BY_USER_ID, &["userId"]),
    (CHECK_AND_GET_USER, &["email"]),
    (CHECK_MEMBER, &["projectId", "memberId"]),
    (GET_PROJECTS_BY_ID, &["id"]),
    (
        INSERT_PROJECT_MEMBER,
        &["projectId", "memberId", "memberMail", "createdBy", "isActive"],
    ),
    (UPDATE_PROJECT_MEMBER, &["memberId", "projectId", "updatedBy", "isActive"]),
    (GET_MEMBER_BY_PROJECT_ID, &["projectId"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::postgres::is_valid_identifier;

    #[test]
    fn catalog_identifiers_are_quotable() {
        for (name, params) in CATALOG {
            assert!(is_valid_identifier(name), "bad procedure name {}", name);
            for p in *params {
                assert!(is_valid_identifier(p), "bad parameter {} on {}", p, name);
            }
        }
    }
}
