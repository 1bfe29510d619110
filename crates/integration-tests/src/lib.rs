//! End-to-end test harness for the Mock Shop fixture.
//!
//! [`TestServer`] runs the real router on an ephemeral loopback port and
//! drives it over HTTP with `reqwest`, so every test exercises the same
//! stack the binary serves. Each server owns a fresh store; tests never
//! share state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mock-shop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{Ipv4Addr, SocketAddr};

use mock_shop_server::{AppState, FixtureConfig, app};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tokio::sync::oneshot;

/// A fixture server bound to `127.0.0.1:<ephemeral>`.
///
/// Shuts down gracefully when dropped.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Bind a listener and start serving in the background.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the loopback listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;

        let config = FixtureConfig {
            host: addr.ip(),
            port: addr.port(),
            ..FixtureConfig::default()
        };
        let router = app(AppState::new(config));

        let (shutdown, signal) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await;
        });

        Ok(Self {
            addr,
            client: Client::new(),
            shutdown: Some(shutdown),
        })
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The bound port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Start a GET request.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Start a POST request.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Start a PUT request.
    #[must_use]
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    /// Start a DELETE request.
    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Register `username` and return the new account id.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest` error if the request fails or the response is not
    /// JSON.
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Result<Value> {
        self.post("/register")
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await?
            .json()
            .await
    }

    /// Log in and return the access token, if the login succeeded.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest` error if the request fails or the response is not
    /// JSON.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Result<Option<String>> {
        let body: Value = self
            .post("/auth")
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await?
            .json()
            .await?;
        Ok(body["access_token"].as_str().map(str::to_string))
    }

    /// Register and log in, returning the account id and a bearer header value.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest` error if either request fails.
    pub async fn sign_up(&self, username: &str, password: &str) -> reqwest::Result<(u64, String)> {
        let registered = self.register(username, password).await?;
        let token = self.login(username, password).await?.unwrap_or_default();
        Ok((
            registered["uuid"].as_u64().unwrap_or_default(),
            format!("Bearer {token}"),
        ))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Status code and JSON body of a response (`null` for an empty body).
///
/// # Errors
///
/// Returns a `reqwest` error if the body cannot be read.
pub async fn read(response: Response) -> reqwest::Result<(u16, Value)> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, body))
}
