/// Role carried by the caller. Matching is exact and case-sensitive;
/// anything other than `Admin` or `Manager`, including no role at all,
/// is an ordinary user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    pub fn from_claim(role: Option<&str>) -> Self {
        match role {
            Some("Admin") => Role::Admin,
            Some("Manager") => Role::Manager,
            _ => Role::User,
        }
    }
}

/// Authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub user_role: Option<String>,
}

impl Caller {
    pub fn new(user_id: i64, user_role: Option<String>) -> Self {
        Self { user_id, user_role }
    }

    pub fn role(&self) -> Role {
        Role::from_claim(self.user_role.as_deref())
    }
}

/// Admin or Manager may create projects
pub fn can_create_project(caller: &Caller) -> bool {
    matches!(caller.role(), Role::Admin | Role::Manager)
}

/// Admin, or the project's creator, may update it or change its members.
/// Manager alone is not enough here, unlike creation.
pub fn can_mutate_project(caller: &Caller, project_created_by: i64) -> bool {
    caller.role() == Role::Admin || caller.user_id == project_created_by
}
