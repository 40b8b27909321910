//! In-process fake of the résumé backend for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::api_client::ApiClient;
use crate::auth::CredentialProvider;
use crate::config::Config;
use crate::state::AppState;

pub const GOOD_PASSWORD: &str = "correct-password";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    reject_tokens: bool,
    rate_limit_generation: bool,
    fail_saves: bool,
    record: Option<Value>,
    statuses: VecDeque<Value>,
    saves: u32,
}

#[derive(Clone, Default)]
struct FakeState(Arc<Mutex<Inner>>);

impl FakeState {
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.0.lock().unwrap();
        f(&mut inner)
    }

    fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.with(|inner| {
            inner.requests.push(RecordedRequest {
                method,
                path: uri.path().to_string(),
                authorization,
                body,
            })
        });
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let has_token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Token "));
        has_token && !self.with(|inner| inner.reject_tokens)
    }
}

pub struct FakeBackend {
    pub base_url: String,
    state: FakeState,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = Router::new()
            .route("/api/api-token-auth/", post(login))
            .route("/api/register/", post(register))
            .route("/api/users/me/", get(current_user))
            .route("/api/user-stats/", get(user_stats))
            .route("/api/projects/", get(projects))
            .route("/api/projects/:id/", delete(delete_project))
            .route("/api/templates/", get(templates))
            .route("/api/generate/", post(generate))
            .route("/api/parse-cv-pdf/", post(parse_pdf))
            .route("/api/save-imported-cv/", post(save_imported))
            .route("/api/get-cv-data/:job/", get(get_cv_data))
            .route("/api/update-cv-data/", post(update_cv_data))
            .route("/api/check-job-status/:job/", get(job_status))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn client(&self, credentials: Arc<dyn CredentialProvider>) -> ApiClient {
        ApiClient::new(&self.base_url, Duration::from_secs(5), credentials).unwrap()
    }

    /// Full application state with file-backed credentials under `data_dir`.
    pub fn app_state(&self, data_dir: &std::path::Path) -> AppState {
        let config = Config {
            api_url: self.base_url.clone(),
            oauth_client_id: None,
            data_dir: data_dir.to_path_buf(),
            poll_interval: Duration::from_millis(10),
            request_timeout: Duration::from_secs(5),
            language: "ar".to_string(),
            rust_log: "debug".to_string(),
        };
        AppState::from_config(config).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.with(|inner| inner.requests.clone())
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn reject_tokens(&self) {
        self.state.with(|inner| inner.reject_tokens = true);
    }

    pub fn rate_limit_generation(&self) {
        self.state.with(|inner| inner.rate_limit_generation = true);
    }

    pub fn fail_saves(&self) {
        self.state.with(|inner| inner.fail_saves = true);
    }

    pub fn set_record(&self, record: Value) {
        self.state.with(|inner| inner.record = Some(record));
    }

    /// Queues job-status bodies; the last one repeats once the queue drains.
    pub fn script_statuses(&self, statuses: Vec<Value>) {
        self.state.with(|inner| inner.statuses = statuses.into());
    }
}

pub fn sample_record() -> Value {
    json!({
        "full_name": "سارة أحمد",
        "contact": { "email": "sara@example.com", "phone": "+966500000000" },
        "professional_summary": "مهندسة برمجيات",
        "experience": [{
            "role": "Backend Engineer",
            "company": "Acme",
            "date_range": "يناير 2020 - حالياً",
            "responsibilities": ["Built the billing service"]
        }],
        "education": [{
            "degree": "بكالوريوس",
            "institution": "جامعة الملك سعود",
            "date_range": "2019",
            "details": ["علوم الحاسب"]
        }],
        "projects": [],
        "skills": [
            { "category_name": "لغات البرمجة", "skills": ["Rust", "Python"] },
            { "category_name": "Tools", "skills": ["Git"] }
        ],
        "responsibilities": [{
            "title": "Mentor",
            "organization": "Code Club",
            "date_range": "2018 - 2019",
            "details": ["Weekly sessions"]
        }]
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid token." })),
    )
        .into_response()
}

async fn login(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(method, &uri, &headers, Some(body.clone()));
    if body["password"] == GOOD_PASSWORD {
        let token = format!("tok-{}", body["username"].as_str().unwrap_or_default());
        Json(json!({ "token": token })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "non_field_errors": ["Unable to log in with provided credentials."] })),
        )
            .into_response()
    }
}

async fn register(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(method, &uri, &headers, Some(body.clone()));
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "username": ["A user with that username already exists."] })),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "token": "tok-new" }))).into_response()
}

async fn current_user(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(method, &uri, &headers, None);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 7, "username": "sara", "email": "sara@example.com" })).into_response()
}

async fn user_stats(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(method, &uri, &headers, None);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "total_cvs": 3, "successful_cvs": 2, "today_count": 1,
        "daily_limit": 5, "is_premium": false, "remaining_today": 4
    }))
    .into_response()
}

async fn projects(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(method, &uri, &headers, None);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "count": 1,
        "results": [{
            "id": 11, "name": "سيرتي", "latest_job_id": "job-1",
            "latest_job_status": "SUCCESS", "pdf_url": "http://files/cv.pdf"
        }]
    }))
    .into_response()
}

async fn delete_project(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(_id): Path<String>,
) -> Response {
    state.record(method, &uri, &headers, None);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn templates(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(method, &uri, &headers, None);
    Json(json!([
        { "id": 1, "name": "احترافي", "category": "Professional", "usage_count": 12, "rating": 4.5 },
        { "id": "modern", "name": "عصري", "is_premium": true }
    ]))
    .into_response()
}

async fn generate(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(method, &uri, &headers, Some(body));
    if !state.authorized(&headers) {
        return unauthorized();
    }
    if state.with(|inner| inner.rate_limit_generation) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "daily limit reached" })),
        )
            .into_response();
    }
    (
        StatusCode::ACCEPTED,
        Json(json!({ "resume_id": "job-gen-1", "status": "QUEUED" })),
    )
        .into_response()
}

async fn parse_pdf(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let raw = String::from_utf8_lossy(&body);
    let summary = json!({
        "size": body.len(),
        "has_file_part": raw.contains("name=\"file\""),
        "has_pdf_magic": raw.contains("%PDF"),
    });
    state.record(method, &uri, &headers, Some(summary));
    if state.authorized(&headers) {
        Json(json!({ "job_id": "job-import-1", "cv_data": sample_record() })).into_response()
    } else {
        Json(json!({ "cv_data": sample_record() })).into_response()
    }
}

async fn save_imported(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(method, &uri, &headers, Some(body));
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::CREATED, Json(json!({ "job_id": "job-import-2" }))).into_response()
}

async fn get_cv_data(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(job): Path<String>,
) -> Response {
    state.record(method, &uri, &headers, None);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    if job == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "CV not found" })),
        )
            .into_response();
    }
    let record = state
        .with(|inner| inner.record.clone())
        .unwrap_or_else(sample_record);
    Json(json!({
        "success": true,
        "cv_data": record,
        "template_id": "classic",
        "status": "SUCCESS",
        "pdf_url": format!("http://files/{job}.pdf")
    }))
    .into_response()
}

async fn update_cv_data(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(method, &uri, &headers, Some(body));
    if !state.authorized(&headers) {
        return unauthorized();
    }
    if state.with(|inner| inner.fail_saves) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "compile queue unavailable" })),
        )
            .into_response();
    }
    let n = state.with(|inner| {
        inner.saves += 1;
        inner.saves
    });
    Json(json!({ "job_id": format!("job-saved-{n}"), "status": "PROCESSING" })).into_response()
}

async fn job_status(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(job): Path<String>,
) -> Response {
    state.record(method, &uri, &headers, None);
    let scripted = state.with(|inner| {
        if inner.statuses.len() > 1 {
            inner.statuses.pop_front()
        } else {
            inner.statuses.front().cloned()
        }
    });
    let body = scripted.unwrap_or_else(|| {
        json!({ "job_id": job, "status": "SUCCESS", "pdf_url": format!("http://files/{job}.pdf") })
    });
    Json(body).into_response()
}
