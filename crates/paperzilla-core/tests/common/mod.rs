//! Shared test helpers: an in-process mock of the Paperzilla API that
//! records every request it receives, and a scripted `Prompter`.

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use paperzilla_core::auth::{Prompter, SessionEvent};
use paperzilla_core::ApiClient;
use serde_json::Value;

/// A request as seen by the mock server
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
}

pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockServer {
    /// Start a server on an ephemeral port that answers every request with `responder`
    pub async fn start(
        responder: impl Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(&self.base_url).expect("Failed to build client")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

async fn record(State(state): State<MockState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map(|b| b.to_vec())
        .unwrap_or_default();

    let recorded = RecordedRequest {
        method: parts.method,
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body,
    };
    let (status, payload) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);

    (status, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

#[allow(dead_code)]
pub fn reply(status: StatusCode, value: Value) -> (StatusCode, String) {
    (status, value.to_string())
}

#[allow(dead_code)]
pub fn grant(access: &str, refresh: &str, expires_in: i64) -> (StatusCode, String) {
    reply(
        StatusCode::OK,
        serde_json::json!({
            "access_token": access,
            "refresh_token": refresh,
            "expires_in": expires_in,
        }),
    )
}

/// Answers login prompts from fixed values and records what happened
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub email: String,
    pub code: String,
    pub email_prompts: usize,
    pub code_prompts: usize,
    pub events: Vec<SessionEvent>,
}

#[allow(dead_code)]
impl ScriptedPrompter {
    pub fn new(email: &str, code: &str) -> Self {
        Self {
            email: email.to_string(),
            code: code.to_string(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn email(&mut self) -> std::io::Result<String> {
        self.email_prompts += 1;
        Ok(format!("  {}\n", self.email))
    }

    fn code(&mut self) -> std::io::Result<String> {
        self.code_prompts += 1;
        Ok(format!("{}\n", self.code))
    }

    fn notify(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}
