use std::collections::HashMap;

use serde::Deserialize;

use super::VaccinationDrive;

/// Per-grade vaccination counts, `{"stats": {"5": 12, "6": 9}}` on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeWiseStats {
    #[serde(default)]
    pub stats: HashMap<String, i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSummary {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub completed: i64,
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub overdue: i64,
    #[serde(rename = "completionRate", default)]
    pub completion_rate: f64,
}

/// Wrapper the dashboard endpoint uses for its upcoming-drives list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpcomingDrives {
    #[serde(default)]
    pub drives: Vec<VaccinationDrive>,
}

/// Everything the dashboard screen renders, assembled from the individual
/// count endpoints fetched in parallel.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_students: i64,
    pub vaccines_administered: i64,
    pub vaccines_due_soon: i64,
    pub vaccines_overdue: i64,
    pub grade_wise: GradeWiseStats,
    pub status_summary: StatusSummary,
    pub upcoming_drives: Vec<VaccinationDrive>,
}

impl DashboardSummary {
    /// Share of students with at least one administered vaccine, in percent.
    pub fn vaccination_rate(&self) -> f64 {
        if self.total_students > 0 {
            (self.vaccines_administered as f64 / self.total_students as f64) * 100.0
        } else {
            0.0
        }
    }
}
