//! Test helpers for integration tests
//!
//! Provides a test server over an in-memory store and HTTP helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vivah_api::{create_app, create_app_state_with_context};
use vivah_common::{
    AppConfig, AppSettings, AuthConfig, CorsConfig, DatabaseConfig, Environment, IdConfig,
    NotificationConfig, RateLimitConfig, ServerConfig,
};
use vivah_core::{PlanTier, UserId};
use vivah_db::InMemoryStore;
use vivah_service::{RetryPolicy, ServiceContext};

use crate::fixtures::{mint_token, profile, TEST_SECRET};

/// Running server and the store behind it
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<InMemoryStore>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with no profiles
    pub async fn start() -> Result<Self> {
        Self::start_with_store(Arc::new(InMemoryStore::new())).await
    }

    /// Start a server with a profile for each of `users`
    pub async fn with_users(users: &[&str]) -> Result<Self> {
        let store = Arc::new(InMemoryStore::new());
        for user in users {
            store.insert_profile(profile(user));
        }
        Self::start_with_store(store).await
    }

    pub async fn start_with_store(store: Arc<InMemoryStore>) -> Result<Self> {
        let config = test_config();
        let context = ServiceContext::builder()
            .store(store.clone())
            .retry_policy(RetryPolicy::immediate(config.notifications.max_attempts))
            .build()?;

        let app = create_app(create_app_state_with_context(context, config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn premium(&self, user: &str) {
        self.store.set_plan(UserId::new(user), PlanTier::Premium);
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request as `user`
    pub async fn get_as(&self, path: &str, user: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .bearer_auth(mint_token(user, TEST_SECRET))
            .send()
            .await?)
    }

    /// Make a body-less POST request as `user`
    pub async fn post_as(&self, path: &str, user: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(mint_token(user, TEST_SECRET))
            .send()
            .await?)
    }

    /// `liker` likes `liked` through the API
    pub async fn like(&self, liker: &str, liked: &str) -> Result<Response> {
        self.post_as(&format!("/api/v1/profiles/{liked}/likes"), liker)
            .await
    }
}

/// Configuration for an in-memory test server
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "vivah-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            run_migrations: false,
        },
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            issuer: None,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1_000,
            burst: 1_000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        ids: IdConfig { worker_id: 1 },
        notifications: NotificationConfig::default(),
    }
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
