//! End-to-end tests for the request gateway against a mock backend.
//!
//! A small axum server on an ephemeral port stands in for the vaccination
//! tracking backend, so credential attachment, login handling, and the
//! 401 teardown path are exercised over real HTTP.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use vaxtrack_core::api::{ApiError, Gateway, NavIntent};
use vaxtrack_core::auth::SessionStore;
use vaxtrack_core::models::StudentQuery;

/// Serve the given router on an ephemeral port, returning its base URL.
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend died");
    });
    format!("http://{}", addr)
}

fn session_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::new(dir.path().to_path_buf())
}

async fn login_ok_backend() -> String {
    let app = Router::new().route(
        "/user/login",
        post(|| async {
            Json(json!({
                "token": "abc123",
                "user": {"id": 1, "username": "admin", "role": "ADMIN"}
            }))
        }),
    );
    spawn_backend(app).await
}

#[tokio::test]
async fn login_success_establishes_session() {
    let dir = tempfile::tempdir().unwrap();
    let base = login_ok_backend().await;
    let session = session_in(&dir);
    let (gateway, _nav) = Gateway::new(base, session.clone()).unwrap();

    let profile = gateway.login("admin", "secret").await.unwrap();

    assert_eq!(profile.username.as_deref(), Some("admin"));
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("abc123"));
    // The credential survives a restart via the on-disk slot.
    assert!(dir.path().join("token").exists());
}

#[tokio::test]
async fn login_then_logout_leaves_no_credential_behind() {
    let dir = tempfile::tempdir().unwrap();
    let base = login_ok_backend().await;
    let session = session_in(&dir);
    let (gateway, _nav) = Gateway::new(base, session.clone()).unwrap();

    gateway.login("admin", "secret").await.unwrap();
    gateway.logout();

    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert!(!dir.path().join("token").exists());
}

#[tokio::test]
async fn rejected_login_reports_backend_message_and_mutates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/user/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid username or password"})),
            )
        }),
    );
    let base = spawn_backend(app).await;
    let session = session_in(&dir);
    let (gateway, mut nav) = Gateway::new(base, session.clone()).unwrap();

    let err = gateway.login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid username or password");
    assert!(!session.is_authenticated());
    assert!(!dir.path().join("token").exists());
    // A failed login is not an authorization failure on an authenticated
    // call; no navigation intent is emitted.
    assert!(nav.try_recv().is_err());
}

#[tokio::test]
async fn login_failure_without_payload_uses_generic_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/user/login",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_backend(app).await;
    let (gateway, _nav) = Gateway::new(base, session_in(&dir)).unwrap();

    let err = gateway.login("admin", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed. Please try again.");
}

#[tokio::test]
async fn stored_credential_is_attached_as_bearer_header() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the Authorization header back so the test can see what was sent.
    let app = Router::new().route(
        "/students/export",
        get(|headers: HeaderMap| async move {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        }),
    );
    let base = spawn_backend(app).await;

    let session = session_in(&dir);
    session.establish("abc123".into(), None).unwrap();
    let (gateway, _nav) = Gateway::new(base, session).unwrap();

    let echoed = gateway.export_students().await.unwrap();
    assert_eq!(echoed, "Bearer abc123");
}

#[tokio::test]
async fn missing_credential_sends_bare_request_and_401_forces_login() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/vaccines",
        get(|headers: HeaderMap| async move {
            // The gateway must not have invented a header on its own.
            assert!(headers.get(header::AUTHORIZATION).is_none());
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Full authentication is required"})),
            )
        }),
    );
    let base = spawn_backend(app).await;

    let session = session_in(&dir);
    let (gateway, mut nav) = Gateway::new(base, session.clone()).unwrap();

    let err = gateway.list_vaccines().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Unauthorized)
    ));

    // Store ends with no token and the routing layer is told to show login.
    assert!(!session.is_authenticated());
    assert_eq!(nav.try_recv().ok(), Some(NavIntent::Login));
    assert!(nav.try_recv().is_err());
}

#[tokio::test]
async fn concurrent_401s_each_clear_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/vaccines",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Token expired"})),
            )
        }),
    );
    let base = spawn_backend(app).await;

    let session = session_in(&dir);
    session.establish("stale-token".into(), None).unwrap();
    let (gateway, mut nav) = Gateway::new(base, session.clone()).unwrap();

    // A dashboard-style burst: several in-flight calls fail together.
    let (a, b, c) = tokio::join!(
        gateway.list_vaccines(),
        gateway.list_vaccines(),
        gateway.list_vaccines(),
    );
    for result in [a, b, c] {
        assert!(matches!(
            result.unwrap_err().downcast_ref::<ApiError>(),
            Some(ApiError::Unauthorized)
        ));
    }

    assert!(!session.is_authenticated());
    assert!(!dir.path().join("token").exists());

    // One intent per failure observed, and nothing more.
    let mut intents = 0;
    while nav.try_recv().is_ok() {
        intents += 1;
    }
    assert_eq!(intents, 3);
}

#[tokio::test]
async fn other_error_statuses_pass_through_without_teardown() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/students/{id}",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "Student not found"})),
            )
        }),
    );
    let base = spawn_backend(app).await;

    let session = session_in(&dir);
    session.establish("abc123".into(), None).unwrap();
    let (gateway, mut nav) = Gateway::new(base, session.clone()).unwrap();

    let err = gateway.get_student(99).await.unwrap_err();
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::NotFound(msg)) => assert_eq!(msg, "Student not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    // The session is untouched and no navigation was requested.
    assert!(session.is_authenticated());
    assert!(nav.try_recv().is_err());
}

#[tokio::test]
async fn roster_query_parameters_reach_the_backend() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/students",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("page").map(String::as_str), Some("0"));
            assert_eq!(params.get("size").map(String::as_str), Some("10"));
            assert_eq!(params.get("name").map(String::as_str), Some("asha"));
            assert!(!params.contains_key("grade"));
            Json(json!({
                "content": [{
                    "id": 1,
                    "name": "Asha Rao",
                    "grade": "5",
                    "vaccinationStatus": "PENDING"
                }],
                "totalPages": 1,
                "totalElements": 1,
                "number": 0
            }))
        }),
    );
    let base = spawn_backend(app).await;

    let session = session_in(&dir);
    session.establish("abc123".into(), None).unwrap();
    let (gateway, _nav) = Gateway::new(base, session).unwrap();

    let page = gateway
        .list_students(&StudentQuery {
            name: Some("asha".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].name, "Asha Rao");
}

#[tokio::test]
async fn csv_import_uploads_multipart_and_parses_summary() {
    let dir = tempfile::tempdir().unwrap();
    let app = Router::new().route(
        "/students/import",
        post(|headers: HeaderMap| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            assert!(content_type.starts_with("multipart/form-data"));
            Json(json!({"success": true, "imported": 2, "total": 2, "errors": []}))
        }),
    );
    let base = spawn_backend(app).await;

    let session = session_in(&dir);
    session.establish("abc123".into(), None).unwrap();
    let (gateway, _nav) = Gateway::new(base, session).unwrap();

    let csv = b"name,grade\nAsha Rao,5\nRavi Iyer,6\n".to_vec();
    let summary = gateway.import_students("roster.csv", csv).await.unwrap();

    assert!(summary.success);
    assert_eq!(summary.imported, 2);
    assert!(summary.errors.is_empty());
}

#[tokio::test]
async fn restored_session_is_authenticated_before_any_network_call() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("token"), "abc123").unwrap();

    let session = session_in(&dir);
    assert!(session.restore().unwrap());
    // Optimistic startup: no backend involved, the token is trusted as-is.
    assert!(session.is_authenticated());

    // A backend that has since revoked the token tears the session down on
    // the first real call.
    let app = Router::new().route(
        "/vaccines",
        get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "revoked"}))) }),
    );
    let base = spawn_backend(app).await;
    let (gateway, mut nav) = Gateway::new(base, session.clone()).unwrap();

    assert!(gateway.list_vaccines().await.is_err());
    assert!(!session.is_authenticated());
    assert_eq!(nav.try_recv().ok(), Some(NavIntent::Login));
}
