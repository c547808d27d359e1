//! Test helpers for integration tests
//!
//! Provides a test server running the real router, HTTP request helpers,
//! and response assertions.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vanish_api::{create_app, AppState};
use vanish_common::AppConfig;
use vanish_core::{ManualClock, Snowflake, SnowflakeGenerator};
use vanish_db::MemoryStore;
use vanish_service::{ExpirySweeper, ServiceContext};

/// Shared with the server so tokens verify
pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Drives every expiry decision the server makes
    pub clock: Arc<ManualClock>,
    pub store: MemoryStore,
    state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with a high rate limit
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config(&[])?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let clock = Arc::new(ManualClock::starting_now());
        let store = MemoryStore::new();
        let service_context = ServiceContext::in_memory(
            store.clone(),
            clock.clone(),
            Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
        );
        let state = AppState::new(service_context, config);
        let app = create_app(state.clone());

        // Ephemeral port, so tests can run in parallel
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            clock,
            store,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Mint a bearer token for `user_id`, as the identity provider would
    pub fn token_for(&self, user_id: i64) -> Result<String> {
        Ok(self
            .state
            .jwt_service()
            .issue_access_token(Snowflake::new(user_id))?)
    }

    /// A sweeper over the server's store and clock, driven by hand
    pub fn sweeper(&self) -> ExpirySweeper {
        ExpirySweeper::from_context(self.state.service_context(), Duration::from_secs(60))
    }

    /// Move the server's clock forward
    pub fn advance(&self, by: chrono::Duration) {
        self.clock.advance(by);
    }

    async fn send(&self, request: RequestBuilder, token: Option<&str>) -> Result<Response> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        Ok(request.send().await?)
    }

    /// Make a GET request, with auth when a token is given
    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        self.send(self.client.get(self.url(path)), token).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        self.send(self.client.post(self.url(path)).json(body), token)
            .await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        self.send(self.client.put(self.url(path)).json(body), token)
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response> {
        self.send(self.client.delete(self.url(path)), token).await
    }
}

/// Build a test configuration, with `overrides` applied on top
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("API_PORT", "0"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "10000"),
        ("WORKER_ID", "7"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
