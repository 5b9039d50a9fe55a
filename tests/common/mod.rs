#![allow(dead_code)]

use std::future::IntoFuture;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use uuid::Uuid;

use report_api_rust::config::{AppConfig, StorageBackend};
use report_api_rust::{app, AppState};

/// Server running on the calling test's runtime; it stops with the test
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    handle: JoinHandle<std::io::Result<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = self.url("/health");
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
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
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.backend = StorageBackend::Memory;
    config.api.enable_request_logging = false;
    config.security.enable_cors = false;
    config.security.bcrypt_cost = 4;
    config
}

/// Start an in-memory server on an unused local port
pub async fn start_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let state = AppState::in_memory(test_config());
    let handle = tokio::spawn(axum::serve(listener, app(state)).into_future());

    let server = TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        handle,
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

/// Username that will not collide with other tests
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// A registered, logged-in user
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

impl TestUser {
    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }
}

pub async fn signup(server: &TestServer, username: &str, password: &str) -> Result<reqwest::Response> {
    Ok(reqwest::Client::new()
        .post(server.url("/auth/signup"))
        .json(&json!({
            "username": username,
            "password": password,
            "displayName": format!("{} display", username),
        }))
        .send()
        .await?)
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<reqwest::Response> {
    Ok(reqwest::Client::new()
        .post(server.url("/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?)
}

/// Sign up a fresh user and log them in
pub async fn register_user(server: &TestServer, prefix: &str) -> Result<TestUser> {
    let username = unique_username(prefix);

    let res = signup(server, &username, "secret").await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "signup failed: {}", res.status());
    let created: Value = res.json().await?;
    let id: Uuid = serde_json::from_value(created["id"].clone())?;

    let res = login(server, &username, "secret").await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("login response without token")?.to_string();

    Ok(TestUser { id, username, token })
}

/// Create a report as `user`, returning its id
pub async fn create_report(server: &TestServer, user: &TestUser, title: &str, description: &str) -> Result<Uuid> {
    let res = user
        .authorize(reqwest::Client::new().post(server.url("/reports")))
        .json(&json!({ "title": title, "description": description }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "create failed: {}", res.status());
    Ok(res.json::<Uuid>().await?)
}
