//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting access tokens,
//! seeding rows and asserting on responses.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use hub_api::{create_app, create_app_state};
use hub_common::{
    AppConfig, AppSettings, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtService,
    RateLimitConfig, ServerConfig, SiteConfig,
};
use hub_core::entities::{ExpertProfile, Profile, ProfileSeed};
use hub_core::traits::ProfileRepository;
use hub_core::value_objects::{ApprovalStatus, Role};
use hub_db::{PgExpertProfileRepository, PgPool, PgProfileRepository};
use reqwest::{redirect, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;
use wiremock::MockServer;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";
pub const TEST_ANON_KEY: &str = "integration-anon-key";
pub const TEST_SERVICE_KEY: &str = "integration-service-key";
pub const TEST_SITE_URL: &str = "https://hub.test";

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    /// Stand-in for the identity provider
    pub provider: MockServer,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with a fresh provider mock
    pub async fn start() -> Result<Self> {
        let provider = MockServer::start().await;
        let config = test_config(&provider.uri())?;

        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let app = create_app(state);

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Redirects are asserted on, never followed
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            pool,
            provider,
            jwt: JwtService::new(TEST_JWT_SECRET, "authenticated"),
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

    /// Access token as the provider would issue it
    pub fn token_for(&self, user_id: Uuid) -> Result<String> {
        self.jwt
            .encode_access_token(user_id, None, 3600)
            .map_err(|e| anyhow::anyhow!("Failed to mint token: {e}"))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET with a raw `Cookie` header
    pub async fn get_with_cookies(&self, path: &str, cookies: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header("Cookie", cookies)
            .send()
            .await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Send a CORS preflight
    pub async fn preflight(&self, path: &str) -> Result<Response> {
        Ok(self
            .client
            .request(reqwest::Method::OPTIONS, self.url(path))
            .header("Origin", "https://admin.hub.test")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "authorization,content-type,apikey")
            .send()
            .await?)
    }

    // ------------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------------

    pub fn profiles(&self) -> PgProfileRepository {
        PgProfileRepository::new(self.pool.clone())
    }

    pub fn experts(&self) -> PgExpertProfileRepository {
        PgExpertProfileRepository::new(self.pool.clone())
    }

    /// Insert a profile row directly
    pub async fn seed_profile(
        &self,
        role: Role,
        status: ApprovalStatus,
        onboarded: bool,
    ) -> Result<Profile> {
        let id = Uuid::new_v4();
        let mut profile = Profile::new(
            id,
            ProfileSeed {
                email: Some(format!("{id}@example.com")),
                ..Default::default()
            },
        );
        profile.role = role;
        profile.approval_status = status;
        profile.onboarding_completed = onboarded;
        self.profiles().create(&profile).await?;
        Ok(profile)
    }

    pub async fn seed_admin(&self) -> Result<Profile> {
        self.seed_profile(Role::Admin, ApprovalStatus::Approved, true).await
    }

    pub async fn seed_expert_application(&self, user_id: Uuid) -> Result<ExpertProfile> {
        let expert = ExpertProfile::new(Uuid::new_v4(), user_id);
        self.experts().insert(&expert).await?;
        Ok(expert)
    }

    pub async fn profile(&self, id: Uuid) -> Result<Option<Profile>> {
        Ok(self.profiles().find_by_id(id).await?)
    }
}

/// Create a test configuration pointing at the given provider
pub fn test_config(provider_url: &str) -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

    Ok(AppConfig {
        app: AppSettings {
            name: "expert-hub-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        auth: AuthConfig {
            url: provider_url.to_string(),
            anon_key: TEST_ANON_KEY.to_string(),
            service_key: TEST_SERVICE_KEY.to_string(),
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_audience: "authenticated".to_string(),
            profile_retry_delay_ms: 10,
            code_verifier_cookie: "auth-code-verifier".to_string(),
        },
        site: SiteConfig {
            url: TEST_SITE_URL.to_string(),
            default_locale: "ko".to_string(),
            default_next_path: "/support-programs".to_string(),
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
    })
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Redirect target of a 307 response
pub fn location(response: &Response) -> Result<String> {
    anyhow::ensure!(
        response.status() == StatusCode::TEMPORARY_REDIRECT,
        "Expected 307, got {}",
        response.status()
    );
    let value = response
        .headers()
        .get("location")
        .context("missing Location header")?;
    Ok(value.to_str()?.to_string())
}

/// `Set-Cookie` headers of a response
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
