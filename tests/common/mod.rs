#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

use notes_api::config::AppConfig;
use notes_api::AppState;

/// A live server on a free port, backed by JSON files in its own temp dir
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    dir: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let dir = tempfile::tempdir()?;

        let mut config = AppConfig::development();
        config.server.port = port;
        config.storage.notes_path = dir.path().join("notes.json");
        config.storage.users_path = dir.path().join("users.json");
        config.api.enable_request_logging = false;

        let state = AppState::from_config(&config).await?;
        let app = notes_api::app(state, &config);
        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server");
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            dir,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.dir.path().join("notes.json")
    }

    pub fn users_path(&self) -> PathBuf {
        self.dir.path().join("users.json")
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/signup"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Sign up and sign in, returning the bearer token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let res = self.signup(name, email, password).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "signup failed: {}", res.status());

        let body: Value = self.signin(email, password).await?.json().await?;
        body["accessToken"]
            .as_str()
            .map(str::to_string)
            .context("signin response missing accessToken")
    }

    pub async fn user_id(&self, token: &str) -> Result<String> {
        let body: Value = self
            .client
            .get(self.url("/me"))
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;
        body["id"].as_str().map(str::to_string).context("missing id")
    }

    pub async fn create_note(&self, token: &str, title: &str, content: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/notes"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());

        let body: Value = res.json().await?;
        body["id"].as_str().map(str::to_string).context("missing note id")
    }
}
