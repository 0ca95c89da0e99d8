use serde::{Deserialize, Serialize};

/// Identity attributes returned by the login endpoint alongside the token.
/// Held in memory for the life of the session; not persisted across restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl UserProfile {
    /// Best display name available for the header bar.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("Administrator")
    }
}
