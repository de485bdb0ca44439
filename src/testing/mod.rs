use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::models::{NotesDocument, User, UsersDocument};
use crate::database::{DocumentStore, MemoryStore, StoreError};
use crate::state::AppState;

const TEST_SECRET: &str = "test-secret";

/// In-memory service plus helpers for driving it request by request
pub struct TestContext {
    pub state: AppState,
    router: Router,
}

/// Notes store whose every read fails like an unreadable file
pub struct BrokenNotesStore;

#[async_trait]
impl DocumentStore<NotesDocument> for BrokenNotesStore {
    async fn load(&self) -> Result<NotesDocument, StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Error reading file",
        )))
    }

    async fn save(&self, _document: &NotesDocument) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Error writing file",
        )))
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_state(AppState::in_memory(Self::keys()))
    }

    pub fn with_broken_notes_store() -> Self {
        Self::with_state(AppState::new(
            Arc::new(BrokenNotesStore),
            Arc::new(MemoryStore::<UsersDocument>::default()),
            Self::keys(),
        ))
    }

    /// In-memory notes with a caller-supplied users store
    pub fn with_users_store(users: Arc<dyn DocumentStore<UsersDocument>>) -> Self {
        Self::with_state(AppState::new(
            Arc::new(MemoryStore::<NotesDocument>::default()),
            users,
            Self::keys(),
        ))
    }

    fn with_state(state: AppState) -> Self {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;

        let router = crate::app(state.clone(), &config);
        Self { state, router }
    }

    fn keys() -> JwtKeys {
        JwtKeys::new(TEST_SECRET, 1).expect("test secret is non-empty")
    }

    /// Store a user directly (skipping password hashing) and issue a token
    pub async fn sign_in_as(&self, email: &str) -> (User, String) {
        let name = email.split('@').next().unwrap_or(email);
        let user = User::new(name, email, "not-a-real-hash".to_string());

        assert!(self.state.users.append(user.clone()).await.expect("append user"));
        let token = self.state.jwt.issue(&user).expect("issue token");
        (user, token)
    }

    /// Valid token for a user that was never stored
    pub fn token_for_unstored_user(&self) -> String {
        let ghost = User::new("ghost", "ghost@x.com", String::new());
        self.state.jwt.issue(&ghost).expect("issue token")
    }

    /// Send one request. JSON bodies come back parsed, anything else as a
    /// JSON string, and an empty body as `Null`.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }
}
