use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    /// School-assigned identifier shown in the roster, distinct from the db id.
    #[serde(rename = "studentId")]
    pub student_id: Option<String>,
    pub name: String,
    pub grade: Option<String>,
    pub section: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "parentName")]
    pub parent_name: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "vaccinationStatus")]
    pub vaccination_status: Option<String>,
}

/// Payload for creating or updating a student record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StudentDraft {
    pub name: String,
    pub grade: String,
    pub section: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "dateOfBirth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "parentName", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(rename = "contactNumber", skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Query parameters for the paginated roster listing.
/// The backend does the filtering; this only shapes the query string.
#[derive(Debug, Clone, Serialize)]
pub struct StudentQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "vaccinationStatus", skip_serializing_if = "Option::is_none")]
    pub vaccination_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Default for StudentQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            name: None,
            grade: None,
            section: None,
            vaccination_status: None,
            gender: None,
        }
    }
}

/// Result of a bulk CSV roster import.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportSummary {
    pub success: bool,
    #[serde(default)]
    pub imported: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub errors: Vec<String>,
}
