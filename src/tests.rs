//! Integration tests for the frontend server and the backend client.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Path,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    routing::{get, put},
    Json, Router,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::backend::{ApiClient, RecordApi, TokenSource};
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::errors::{messages, AppError};
use crate::modal::ModalController;
use crate::models::{QuestionPayload, RecordKind, Status};
use crate::{create_router, AppState};

const TOKEN: &str = "test-token";

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .with_test_writer()
        .try_init();
});

// ==================== STUB BACKEND ====================

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Not authenticated" })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" })))
}

fn stored_questions() -> Value {
    json!([
        {
            "_id": "64f0c2a1b9e7",
            "question": "2 + 2 ?",
            "subject": "math",
            "use": ["exam"],
            "status": "active",
            "responses": ["3", "4"],
            "corrects": ["4"],
            "created_by": 1,
            "created_at": "2024-03-01T10:15:00Z"
        },
        {
            "_id": "64f0c2a1c0de",
            "question": "Capital of France?",
            "subject": ["geography"],
            "use": ["practice"],
            "status": "draft",
            "responses": ["Paris", "Lyon"],
            "corrects": ["Paris"],
            "created_by": 2,
            "edited_at": "2024-03-02T09:00:00"
        }
    ])
}

fn short_questionnaire(id: &str) -> Option<Value> {
    let status = match id {
        "qn1" => "active",
        "qn-old" => "archive",
        _ => return None,
    };
    Some(json!({
        "_id": id,
        "title": "Basics",
        "subject": ["math"],
        "use": ["exam"],
        "questions": ["64f0c2a1b9e7", "64f0c2a1c0de"],
        "status": status,
        "created_by": 1
    }))
}

async fn get_question(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    match stored_questions()
        .as_array()
        .and_then(|all| all.iter().find(|q| q["_id"] == id.as_str()).cloned())
    {
        Some(question) => (StatusCode::OK, Json(question)),
        None => not_found(),
    }
}

async fn create_question(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    if body["question"] == "duplicate" {
        return (StatusCode::CONFLICT, Json(json!({ "detail": "Duplicate" })));
    }
    if body["question"] == "rejected" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "question"], "msg": "too short" }] })),
        );
    }
    (StatusCode::CREATED, Json(json!({ "id": "q-new" })))
}

async fn patch_question(
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    body["_id"] = json!(id);
    (StatusCode::OK, Json(body))
}

async fn get_short(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    match short_questionnaire(&id) {
        Some(questionnaire) => (StatusCode::OK, Json(questionnaire)),
        None => not_found(),
    }
}

async fn get_full(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    match short_questionnaire(&id) {
        Some(mut questionnaire) => {
            questionnaire["questions"] = stored_questions();
            (StatusCode::OK, Json(questionnaire))
        }
        None => not_found(),
    }
}

/// Serve a fake question bank backend and return its base URL.
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/questions", get(|| async { Json(stored_questions()) }))
        .route(
            "/questions/subjects",
            get(|| async { Json(json!(["math", "geography"])) }),
        )
        .route(
            "/questions/uses",
            get(|| async { Json(json!({ "data": ["exam", "practice"] })) }),
        )
        .route("/question", put(create_question))
        .route("/question/{id}", get(get_question).patch(patch_question))
        .route(
            "/questionnaires",
            get(|| async {
                Json(json!({ "data": [
                    short_questionnaire("qn1"),
                    short_questionnaire("qn-old")
                ] }))
            }),
        )
        .route("/questionnaire/{id}/short", get(get_short))
        .route("/questionnaire/{id}/full", get(get_full));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

// ==================== FIXTURE ====================

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    state: AppState,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Lazy::force(&TRACING);

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("users.sqlite");
        let backend_url = spawn_backend().await;

        let config = Config {
            api_url: backend_url,
            api_token: Some(TOKEN.to_string()),
            token_path: temp_dir.path().join("access_token"),
            db_path: db_path.clone(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            user_id: Some(1),
            request_timeout: std::time::Duration::from_secs(5),
        };

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Repository::new(pool);
        repo.create_user("alice", "hunter2").await.unwrap();

        let backend = ApiClient::new(&config).expect("Failed to build client");
        let state = AppState::new(repo, backend, config);
        let app = create_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            state,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn backend(&self) -> ApiClient {
        self.state.backend.as_ref().clone()
    }

    /// Call the router in-process.
    async fn oneshot(&self, method: &str, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = create_router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

// ==================== SERVER ====================

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_login() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/login"))
        .json(&json!({ "name": "alice", "password": "hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["isAuth"], true);
    assert_eq!(body["data"]["id"], 1);

    let resp = fixture
        .client
        .post(fixture.url("/login"))
        .json(&json!({ "name": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_user_name_lookup() {
    let fixture = TestFixture::new().await;

    let body: Value = fixture
        .client
        .get(fixture.url("/api/users/1/name"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["userName"], "alice");
    assert!(body.get("success").is_none());

    let body: Value = fixture
        .client
        .get(fixture.url("/api/users/42/name"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["userName"], "Unknown");
}

#[tokio::test]
async fn test_evaluate_form_downgrades_status() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .oneshot(
            "POST",
            "/api/forms/evaluate",
            json!({
                "kind": "question",
                "mode": "edit",
                "title": "2 + 2 ?",
                "subjects": ["math"],
                "uses": ["exam"],
                "status": "active",
                "entries": [{ "text": "4", "is_correct": false }]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let view = &body["data"]["view"];
    assert_eq!(view["statuses"]["forcedStatus"], "draft");
    assert_eq!(view["status"], "draft");
    assert_eq!(view["validity"]["isValid"], true);
    assert_eq!(view["locks"]["submitLabel"], "Update");
    assert_eq!(body["data"]["state"]["status"], "draft");
    assert_eq!(body["data"]["state"]["entries"][0]["isCorrect"], false);
}

#[tokio::test]
async fn test_evaluate_form_view_mode_locks() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture
        .oneshot(
            "POST",
            "/api/forms/evaluate",
            json!({ "kind": "questionnaire", "mode": "view" }),
        )
        .await;

    let view = &body["data"]["view"];
    assert_eq!(view["locks"]["readonly"], true);
    assert_eq!(view["locks"]["hideControls"], true);
    assert!(view["locks"]["submitLabel"].is_null());
    assert_eq!(view["isSubmittable"], false);
}

#[tokio::test]
async fn test_validate_payload() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .oneshot(
            "POST",
            "/api/forms/validate",
            json!({
                "kind": "question",
                "title": "Q",
                "subjects": ["math"],
                "uses": ["exam"],
                "responses": ["4"],
                "corrects": [],
                "status": "active"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["errors"],
        json!(["A correct response is required for the active or archived status."])
    );

    let (_, body) = fixture
        .oneshot(
            "POST",
            "/api/forms/validate",
            json!({
                "kind": "question",
                "title": "Q",
                "subjects": ["math"],
                "uses": ["exam"],
                "responses": ["4"],
                "corrects": ["5"],
                "status": "active"
            }),
        )
        .await;
    assert_eq!(
        body["data"]["errors"],
        json!(["Correct responses must be among the proposed responses."])
    );
}

#[tokio::test]
async fn test_question_table_filters_and_resolves_creators() {
    let fixture = TestFixture::new().await;

    let body: Value = fixture
        .client
        .get(fixture.url("/api/questions/table"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["shortId"], "b9e7");
    assert_eq!(rows[0]["creator"], "alice");
    assert_eq!(rows[0]["lastModified"], "01/03/2024 10:15");
    assert_eq!(rows[1]["creator"], "Unknown");

    let body: Value = fixture
        .client
        .get(fixture.url("/api/questions/table?subjects=geography&uses=practice,exam"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Capital of France?");
}

#[tokio::test]
async fn test_questionnaire_table_actions() {
    let fixture = TestFixture::new().await;

    let body: Value = fixture
        .client
        .get(fixture.url("/api/questionnaires/table"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["questionCount"], 2);
    assert_eq!(
        rows[0]["actions"],
        json!([
            { "kind": "view", "enabled": true },
            { "kind": "edit", "enabled": true },
            { "kind": "select", "enabled": true }
        ])
    );
    assert_eq!(rows[1]["actions"][2]["enabled"], false);
}

#[tokio::test]
async fn test_select_archived_questionnaire_is_refused() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/questionnaire/qn-old/select"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(fixture.state.repo.selected_questionnaire().await.unwrap(), None);

    let resp = fixture
        .client
        .post(fixture.url("/api/questionnaire/missing/select"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_quiz_flow() {
    let fixture = TestFixture::new().await;

    // Nothing selected yet.
    let resp = fixture.client.get(fixture.url("/api/quiz")).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .client
        .post(fixture.url("/api/questionnaire/qn1/select"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = fixture
        .client
        .get(fixture.url("/api/quiz"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["questions"][0]["title"], "1. 2 + 2 ?");
    assert!(body["data"]["questions"][0].get("corrects").is_none());

    let body: Value = fixture
        .client
        .post(fixture.url("/api/quiz/grade"))
        .json(&json!({ "answers": [["4"], ["Lyon"]] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["score"], 1);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["outcomes"][1]["marks"], json!(["correct", "wrong"]));

    // The active question can now be added to the selected questionnaire.
    let body: Value = fixture
        .client
        .get(fixture.url("/api/questions/table"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"][0]["actions"][2]["kind"], "add_to_quiz");
    assert_eq!(body["data"][0]["actions"][2]["enabled"], true);
}

// ==================== BACKEND CLIENT ====================

fn payload(question: &str) -> QuestionPayload {
    QuestionPayload {
        question: question.to_string(),
        subject: vec!["math".to_string()],
        uses: vec!["exam".to_string()],
        remark: None,
        status: Status::Draft,
        responses: vec!["4".to_string()],
        corrects: Vec::new(),
    }
}

#[tokio::test]
async fn test_client_maps_http_statuses() {
    let fixture = TestFixture::new().await;
    let backend = fixture.backend();

    assert_eq!(backend.create_question(&payload("2 + 2 ?")).await.unwrap(), "q-new");
    assert_eq!(
        backend.create_question(&payload("duplicate")).await,
        Err(AppError::Conflict(messages::CONFLICT.to_string()))
    );
    assert_eq!(
        backend.create_question(&payload("rejected")).await,
        Err(AppError::Unprocessable(
            r#"[{"loc":["body","question"],"msg":"too short"}]"#.to_string()
        ))
    );
    assert_eq!(
        backend.fetch_question("nope").await,
        Err(AppError::NotFound(messages::NOT_FOUND.to_string()))
    );
}

#[tokio::test]
async fn test_client_bad_token_is_unauthorized() {
    let fixture = TestFixture::new().await;
    let backend = ApiClient::with_client(
        Client::new(),
        fixture.backend().base_url(),
        TokenSource::fixed("stale"),
    );

    assert_eq!(
        backend.fetch_question("64f0c2a1b9e7").await,
        Err(AppError::Unauthorized(messages::UNAUTHORIZED.to_string()))
    );
}

#[tokio::test]
async fn test_client_unreachable_backend() {
    let backend = ApiClient::with_client(
        Client::new(),
        "http://127.0.0.1:1",
        TokenSource::fixed(TOKEN),
    );
    assert_eq!(
        backend.fetch_question("q1").await,
        Err(AppError::Transport(messages::UNREACHABLE.to_string()))
    );
    // Tag lists degrade to empty.
    let options = backend.load_tag_options().await;
    assert!(options.subjects.is_empty() && options.uses.is_empty());
}

#[tokio::test]
async fn test_client_tag_lists_accept_both_shapes() {
    let fixture = TestFixture::new().await;
    let options = fixture.backend().load_tag_options().await;
    assert_eq!(options.subjects, vec!["math", "geography"]);
    assert_eq!(options.uses, vec!["exam", "practice"]);
}

// ==================== MODAL OVER HTTP ====================

#[tokio::test]
async fn test_modal_edit_round_trip() {
    let fixture = TestFixture::new().await;
    let mut modal = ModalController::new(RecordKind::Question, Arc::new(fixture.backend()));
    modal.load_tag_options().await;

    let view = modal.open_edit("64f0c2a1b9e7").await.unwrap().unwrap();
    assert_eq!(view.status, Status::Active);
    assert_eq!(modal.form().subjects.iter().collect::<Vec<_>>(), vec!["math"]);

    modal.set_title("2 + 2 = ?").unwrap();
    let outcome = modal.submit().await.unwrap();
    assert_eq!(outcome.id, "64f0c2a1b9e7");
    assert_eq!(outcome.message, "Question updated successfully.");
    assert!(!modal.state().is_open());
}

#[tokio::test]
async fn test_modal_create_reports_status_phrase() {
    let fixture = TestFixture::new().await;
    let mut modal = ModalController::new(RecordKind::Question, Arc::new(fixture.backend()));
    modal.load_tag_options().await;
    modal.open_create();

    modal.set_title("3 + 3 ?").unwrap();
    modal.toggle_subject("math").unwrap();
    modal.toggle_use("exam").unwrap();
    modal.set_entry_text(0, "6").unwrap();

    let outcome = modal.submit().await.unwrap();
    assert_eq!(outcome.id, "q-new");
    assert_eq!(outcome.message, "Question created successfully as draft.");
}

#[tokio::test]
async fn test_modal_conflict_keeps_modal_open() {
    let fixture = TestFixture::new().await;
    let mut modal = ModalController::new(RecordKind::Question, Arc::new(fixture.backend()));
    modal.load_tag_options().await;
    modal.open_create();

    modal.set_title("duplicate").unwrap();
    modal.toggle_subject("math").unwrap();
    modal.toggle_use("exam").unwrap();
    modal.set_entry_text(0, "6").unwrap();

    let err = modal.submit().await.unwrap_err();
    assert_eq!(err.message(), messages::CONFLICT);
    assert!(modal.state().is_open());
    assert_eq!(modal.form().title, "duplicate");
}
