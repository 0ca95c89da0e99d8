use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Vaccine;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaccinationDrive {
    pub id: i64,
    pub vaccine: Option<Vaccine>,
    #[serde(rename = "vaccineBatch")]
    pub vaccine_batch: Option<String>,
    #[serde(rename = "driveDate")]
    pub drive_date: NaiveDate,
    #[serde(rename = "availableDoses")]
    pub available_doses: i32,
    /// Comma-separated grade list as the backend stores it, e.g. "5, 6, 7".
    #[serde(rename = "applicableGrades")]
    pub applicable_grades: Option<String>,
    #[serde(rename = "minimumAge")]
    pub minimum_age: Option<i32>,
    pub notes: Option<String>,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

impl VaccinationDrive {
    pub fn vaccine_name(&self) -> &str {
        self.vaccine
            .as_ref()
            .map(|v| v.name.as_str())
            .unwrap_or("Unknown Vaccine")
    }

    /// Grades this drive applies to, parsed out of the stored comma list.
    pub fn grade_list(&self) -> Vec<String> {
        self.applicable_grades
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// Payload for scheduling or editing a drive.
#[derive(Debug, Clone, Serialize)]
pub struct DriveDraft {
    #[serde(rename = "vaccineId")]
    pub vaccine_id: i64,
    #[serde(rename = "vaccineBatch")]
    pub vaccine_batch: String,
    pub date: NaiveDate,
    #[serde(rename = "availableDoses")]
    pub available_doses: i32,
    #[serde(rename = "targetClasses")]
    pub target_classes: Vec<i64>,
    #[serde(rename = "minimumAge", skip_serializing_if = "Option::is_none")]
    pub minimum_age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
