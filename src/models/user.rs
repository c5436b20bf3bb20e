use serde::Deserialize;

/// Row returned by `usp_checkAndGetUser`
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
}
