//! Wire types for the vaxtrack backend API.
//!
//! Field names follow the backend's camelCase JSON; structs carry explicit
//! `#[serde(rename)]` attributes so the Rust side stays snake_case.

pub mod dashboard;
pub mod drive;
pub mod page;
pub mod record;
pub mod student;
pub mod user;
pub mod vaccine;

pub use dashboard::{DashboardSummary, GradeWiseStats, StatusSummary, UpcomingDrives};
pub use drive::{DriveDraft, VaccinationDrive};
pub use page::Page;
pub use record::{RecordQuery, VaccinationRecord};
pub use student::{ImportSummary, Student, StudentDraft, StudentQuery};
pub use user::UserProfile;
pub use vaccine::{Grade, Vaccine};
