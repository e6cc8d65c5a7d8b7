//! Shared fixtures for HTTP integration tests.
//!
//! Builds the full Actix application over the in-memory adapters from
//! `test_support`, with the real scoring, eligibility, token, and password
//! code in the loop. Only the database and the filesystem are substituted.

// Each integration test binary compiles this module and uses a different
// subset of the helpers.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};

use ambassador_backend::domain::ports::SystemClock;
use ambassador_backend::domain::{
    AccountServiceImpl, AdminServiceImpl, LeaderboardQueryImpl, SubmissionServiceImpl,
    TaskCatalogServiceImpl,
};
use ambassador_backend::inbound::http::health::HealthState;
use ambassador_backend::inbound::http::state::HttpState;
use ambassador_backend::outbound::auth::{JwtTokenCodec, Sha256PasswordHasher};
use ambassador_backend::server::build_app;
use ambassador_backend::test_support::{InMemoryBackend, RecordingFileStore};

/// Shared secret for tokens issued during tests.
pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret";

/// Everything a test needs to drive the application and inspect state.
pub struct TestHarness {
    /// Handle to the in-memory backend for direct state assertions.
    pub backend: InMemoryBackend,
    /// Recording file store for upload assertions.
    pub files: RecordingFileStore,
    /// Handler state to pass to [`build_app`].
    pub http_state: web::Data<HttpState>,
    /// Probe state to pass to [`build_app`].
    pub health_state: web::Data<HealthState>,
}

/// Build an in-memory application harness.
#[must_use]
pub fn harness() -> TestHarness {
    let backend = InMemoryBackend::new();
    let files = RecordingFileStore::new();

    let users = Arc::new(backend.users());
    let tasks = Arc::new(backend.tasks());
    let ledger = Arc::new(backend.ledger());
    let reporting = Arc::new(backend.reporting());
    let hasher = Arc::new(Sha256PasswordHasher::new());
    let tokens = Arc::new(JwtTokenCodec::new(TEST_JWT_SECRET));
    let clock = Arc::new(SystemClock);

    let http_state = HttpState {
        accounts: Arc::new(AccountServiceImpl::new(
            users.clone(),
            hasher,
            tokens,
            clock.clone(),
        )),
        catalog: Arc::new(TaskCatalogServiceImpl::new(
            tasks.clone(),
            ledger.clone(),
            clock.clone(),
        )),
        submissions: Arc::new(SubmissionServiceImpl::new(
            tasks.clone(),
            ledger.clone(),
            Arc::new(files.clone()),
            clock.clone(),
        )),
        leaderboard: Arc::new(LeaderboardQueryImpl::new(
            users.clone(),
            tasks,
            ledger.clone(),
        )),
        admin: Arc::new(AdminServiceImpl::new(users, ledger, reporting, clock)),
    };

    TestHarness {
        backend,
        files,
        http_state: web::Data::new(http_state),
        health_state: web::Data::new(HealthState::new()),
    }
}

impl TestHarness {
    /// Initialise the Actix application for this harness.
    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        test::init_service(build_app(
            self.health_state.clone(),
            self.http_state.clone(),
        ))
        .await
    }

    /// Seed the default task catalog.
    pub async fn seed_catalog(&self) {
        self.http_state
            .catalog
            .seed_default_catalog()
            .await
            .expect("seeding should succeed");
    }
}

/// Issue a request and decode the JSON response body.
pub async fn send<S, B>(
    app: &S,
    req: Request,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, req).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response should be JSON")
    };
    (status, body)
}

/// Build a GET request, optionally authenticated.
#[must_use]
pub fn get(path: &str, token: Option<&str>) -> Request {
    let mut req = test::TestRequest::get().uri(path);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    req.to_request()
}

/// Build a JSON POST request, optionally authenticated.
#[must_use]
pub fn post_json(path: &str, token: Option<&str>, body: Value) -> Request {
    let mut req = test::TestRequest::post().uri(path).set_json(body);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    req.to_request()
}

/// Build a JSON PUT request, optionally authenticated.
#[must_use]
pub fn put_json(path: &str, token: Option<&str>, body: Value) -> Request {
    let mut req = test::TestRequest::put().uri(path).set_json(body);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    req.to_request()
}

/// Build a DELETE request, optionally authenticated.
#[must_use]
pub fn delete(path: &str, token: Option<&str>) -> Request {
    let mut req = test::TestRequest::delete().uri(path);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    req.to_request()
}

/// Register an ambassador and return `(token, profile)`.
pub async fn register<S, B>(app: &S, email: &str, name: &str, college: &str) -> (String, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        post_json(
            "/api/register",
            None,
            json!({
                "email": email,
                "password": "a strong passphrase",
                "name": name,
                "college": college,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");

    let token = body["token"].as_str().expect("token in response").to_owned();
    (token, body["user"].clone())
}
