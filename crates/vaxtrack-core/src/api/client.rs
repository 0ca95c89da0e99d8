//! The request gateway for the vaccination tracking backend.
//!
//! Every screen issues its backend calls through the `Gateway`; nothing else
//! in the application talks HTTP. The gateway attaches the session's bearer
//! token before send, and on a 401 clears the session and emits a
//! [`NavIntent::Login`] for the routing layer to act on.

use anyhow::{Context, Result};
use reqwest::{multipart, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::models::{
    DashboardSummary, DriveDraft, Grade, GradeWiseStats, ImportSummary, Page, RecordQuery,
    StatusSummary, Student, StudentDraft, StudentQuery, UpcomingDrives, UserProfile,
    VaccinationDrive, VaccinationRecord, Vaccine,
};

use super::error::{ApiError, LoginError};

// ============================================================================
// Constants
// ============================================================================

/// The one endpoint issued without a credential.
const LOGIN_PATH: &str = "/user/login";

/// HTTP request timeout in seconds.
/// 30s allows for slow backend responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Navigation directive emitted by the gateway for the routing layer.
///
/// The gateway never manipulates navigation itself; it only reports that the
/// session was torn down and the user belongs on the login screen. The
/// subscriber decides what to do with it (and ignores it when the login
/// screen is already showing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Login,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

/// Single chokepoint for all backend calls.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and clones share the same session store and intent channel.
#[derive(Clone)]
pub struct Gateway {
    http: Client,
    base_url: String,
    session: SessionStore,
    nav: mpsc::UnboundedSender<NavIntent>,
}

impl Gateway {
    /// Create a gateway over the given backend base URL and session store.
    ///
    /// Returns the gateway plus the receiver the routing layer subscribes to
    /// for forced-logout navigation intents.
    pub fn new(
        base_url: impl Into<String>,
        session: SessionStore,
    ) -> Result<(Self, mpsc::UnboundedReceiver<NavIntent>)> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();

        let gateway = Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            nav: nav_tx,
        };
        Ok((gateway, nav_rx))
    }

    /// Session store this gateway reads its credential from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ===== Authentication =====

    /// Authenticate against the backend and establish a session.
    ///
    /// The login request is the one call sent without a credential. On
    /// success the returned token and profile are stored in the session. On
    /// any failure - bad credentials, unreachable backend, malformed
    /// response - the session is left untouched and the error carries the
    /// backend's message (or a generic fallback) for the login screen to
    /// render. This method never tears down an existing session.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, LoginError> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = match self.http.post(self.url(LOGIN_PATH)).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Login request failed to send");
                return Err(LoginError::fallback());
            }
        };

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoginError::from_body(&body));
        }

        let auth: LoginResponse = match response.json().await {
            Ok(auth) => auth,
            Err(e) => {
                warn!(error = %e, "Failed to parse login response");
                return Err(LoginError::fallback());
            }
        };

        let user = auth.user.unwrap_or_default();
        if let Err(e) = self.session.establish(auth.token, Some(user.clone())) {
            // Session is still valid in memory; it just won't survive a restart.
            warn!(error = %e, "Failed to persist credential");
        }
        debug!(username, "login succeeded");
        Ok(user)
    }

    /// Destroy the current session. Synchronous and idempotent.
    pub fn logout(&self) {
        self.session.clear();
    }

    // ===== Request plumbing =====

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request with the current credential snapshot attached.
    /// With no stored token the request goes out bare; the backend rejects it
    /// and the response path below handles the teardown.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => req = req.bearer_auth(token),
            None => debug!(path, "no stored credential, sending without authorization"),
        }
        req
    }

    /// Inspect a response, tearing the session down on an authorization
    /// failure. Every other error status passes through unchanged for the
    /// calling screen to render.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }
        Err(ApiError::from_status(status, &body).into())
    }

    /// Clear the session and tell the routing layer to show the login screen.
    /// Safe to hit from any number of concurrently failing requests: clearing
    /// an already-cleared store is a no-op, and the subscriber ignores
    /// redundant intents.
    fn handle_unauthorized(&self) {
        warn!("backend rejected the credential, clearing session");
        self.session.clear();
        // A closed channel just means no routing layer is listening.
        let _ = self.nav.send(NavIntent::Login);
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", path))?;
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", path))?;
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    async fn get_text_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> Result<String> {
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", path))?;
        let response = self.check_response(response).await?;
        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", path))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", path))?;
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .request(Method::PUT, path)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send PUT request to {}", path))?;
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, path)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", path))?;
        self.check_response(response).await?;
        Ok(())
    }

    // ===== Students =====

    /// Fetch one page of the student roster. Filtering and pagination are
    /// done by the backend; the query only shapes the parameters.
    pub async fn list_students(&self, query: &StudentQuery) -> Result<Page<Student>> {
        self.get_with_query("/students", query).await
    }

    pub async fn get_student(&self, id: i64) -> Result<Student> {
        self.get(&format!("/students/{}", id)).await
    }

    pub async fn create_student(&self, draft: &StudentDraft) -> Result<Student> {
        self.post("/students", draft).await
    }

    pub async fn update_student(&self, id: i64, draft: &StudentDraft) -> Result<Student> {
        self.put(&format!("/students/{}", id), draft).await
    }

    pub async fn delete_student(&self, id: i64) -> Result<()> {
        self.delete(&format!("/students/{}", id)).await
    }

    /// Upload a roster CSV for bulk import. The backend parses and validates;
    /// the summary reports how many rows were accepted.
    pub async fn import_students(
        &self,
        filename: &str,
        csv_bytes: Vec<u8>,
    ) -> Result<ImportSummary> {
        let part = multipart::Part::bytes(csv_bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .context("Failed to build CSV upload part")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .request(Method::POST, "/students/import")
            .multipart(form)
            .send()
            .await
            .context("Failed to send student import request")?;
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse import summary")
    }

    /// Download the full roster as CSV text.
    pub async fn export_students(&self) -> Result<String> {
        let response = self
            .request(Method::GET, "/students/export")
            .send()
            .await
            .context("Failed to send student export request")?;
        let response = self.check_response(response).await?;
        response
            .text()
            .await
            .context("Failed to read exported roster")
    }

    // ===== Vaccination drives =====

    pub async fn list_drives(&self) -> Result<Vec<VaccinationDrive>> {
        self.get("/vaccination-drives").await
    }

    pub async fn upcoming_drives(&self) -> Result<Vec<VaccinationDrive>> {
        self.get("/vaccination-drives/upcoming").await
    }

    pub async fn get_drive(&self, id: i64) -> Result<VaccinationDrive> {
        self.get(&format!("/vaccination-drives/{}", id)).await
    }

    pub async fn create_drive(&self, draft: &DriveDraft) -> Result<VaccinationDrive> {
        self.post("/vaccination-drives", draft).await
    }

    pub async fn update_drive(&self, id: i64, draft: &DriveDraft) -> Result<VaccinationDrive> {
        self.put(&format!("/vaccination-drives/{}", id), draft).await
    }

    pub async fn delete_drive(&self, id: i64) -> Result<()> {
        self.delete(&format!("/vaccination-drives/{}", id)).await
    }

    /// Records administered under one drive.
    pub async fn drive_records(&self, drive_id: i64) -> Result<Vec<VaccinationRecord>> {
        self.get(&format!("/vaccination-drives/{}/records", drive_id))
            .await
    }

    // ===== Vaccination records =====

    pub async fn list_vaccination_records(
        &self,
        query: &RecordQuery,
    ) -> Result<Page<VaccinationRecord>> {
        self.get_with_query("/vaccination-records", query).await
    }

    /// Download filtered vaccination records as CSV text.
    pub async fn export_vaccination_records(&self, query: &RecordQuery) -> Result<String> {
        self.get_text_with_query("/vaccination-records/export", query)
            .await
    }

    // ===== Dashboard =====

    pub async fn student_count(&self) -> Result<i64> {
        self.get("/dashboard/students/count").await
    }

    pub async fn vaccines_administered(&self) -> Result<i64> {
        self.get("/dashboard/vaccines/administered").await
    }

    pub async fn vaccines_due_soon(&self) -> Result<i64> {
        self.get("/dashboard/vaccines/due-soon").await
    }

    pub async fn vaccines_overdue(&self) -> Result<i64> {
        self.get("/dashboard/vaccines/overdue").await
    }

    pub async fn vaccinations_by_grade(&self) -> Result<GradeWiseStats> {
        self.get("/dashboard/vaccinations/by-grade").await
    }

    pub async fn vaccination_status_summary(&self) -> Result<StatusSummary> {
        self.get("/dashboard/vaccinations/status-summary").await
    }

    pub async fn dashboard_upcoming_drives(&self) -> Result<UpcomingDrives> {
        self.get("/dashboard/upcoming-drives").await
    }

    /// Fetch everything the dashboard renders, fanning the count endpoints
    /// out in parallel. Each request carries its own credential snapshot; a
    /// 401 on any of them tears the session down once.
    pub async fn fetch_dashboard(&self) -> Result<DashboardSummary> {
        let (
            total_students,
            vaccines_administered,
            vaccines_due_soon,
            vaccines_overdue,
            grade_wise,
            status_summary,
            upcoming,
        ) = futures::try_join!(
            self.student_count(),
            self.vaccines_administered(),
            self.vaccines_due_soon(),
            self.vaccines_overdue(),
            self.vaccinations_by_grade(),
            self.vaccination_status_summary(),
            self.dashboard_upcoming_drives(),
        )?;

        Ok(DashboardSummary {
            total_students,
            vaccines_administered,
            vaccines_due_soon,
            vaccines_overdue,
            grade_wise,
            status_summary,
            upcoming_drives: upcoming.drives,
        })
    }

    // ===== Reference data =====

    pub async fn list_vaccines(&self) -> Result<Vec<Vaccine>> {
        self.get("/vaccines").await
    }

    pub async fn list_grades(&self) -> Result<Vec<Grade>> {
        self.get("/grades").await
    }
}
