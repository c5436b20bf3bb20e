pub mod member;
pub mod project;
pub mod user;

pub use member::{AddMemberRequest, MemberExistence, MemberListQuery, MemberSummary, UpdateMemberRequest};
pub use project::{
    CreateProjectRequest, ProjectExistence, ProjectOwner, ProjectRow, ProjectView, UpdateProjectRequest,
};
pub use user::UserRecord;

/// Serde helpers for column values whose wire type depends on the database driver
pub(crate) mod column {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept `true`/`false`, `1`/`0` or `"true"`/`"1"` as a flag
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
            Value::String(s) => Ok(matches!(s.as_str(), "true" | "1")),
            Value::Null => Ok(false),
            other => Err(de::Error::custom(format!("expected a flag, got {}", other))),
        }
    }

    /// Accept both naive (`2024-01-02T03:04:05`) and offset (`...+00:00`)
    /// timestamps, normalising to UTC wall time
    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.naive_utc()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, fmt) {
                return Ok(Some(dt));
            }
        }
        Err(de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
