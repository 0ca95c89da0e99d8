use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vaccine {
    pub id: i64,
    pub name: String,
    #[serde(rename = "dosesRequired")]
    pub doses_required: Option<i32>,
    pub description: Option<String>,
}

/// A school class/grade as the backend enumerates them for drive targeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub name: String,
}
