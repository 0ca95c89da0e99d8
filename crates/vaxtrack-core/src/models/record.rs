use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccinationRecord {
    pub id: i64,
    #[serde(rename = "studentName")]
    pub student_name: Option<String>,
    #[serde(rename = "vaccineName")]
    pub vaccine_name: Option<String>,
    #[serde(rename = "vaccinationDate")]
    pub vaccination_date: Option<NaiveDate>,
    pub grade: Option<String>,
    /// COMPLETED, SCHEDULED or OVERDUE as reported by the backend.
    pub status: Option<String>,
    #[serde(rename = "doseNumber")]
    pub dose_number: Option<i32>,
    #[serde(rename = "vaccinationDriveId")]
    pub vaccination_drive_id: Option<i64>,
}

/// Query parameters for the reports listing and CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct RecordQuery {
    pub page: u32,
    pub size: u32,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            start_date: None,
            end_date: None,
            vaccine: None,
            grade: None,
            status: None,
        }
    }
}
