//! Trait and HTTP client for the student auth service.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::contract::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::fetch::{HttpClient, exchange_json, probe};

/// Abstraction over the auth provider.
#[async_trait]
pub trait AuthApi {
    /// Exchanges credentials for an access token.
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse>;

    /// Creates a new student account.
    async fn register(&self, account: &RegisterRequest) -> Result<RegisterResponse>;

    /// `true` if the service answers its health endpoint.
    async fn health(&self) -> bool;
}

/// [`AuthApi`] over HTTP: `POST /login`, `POST /registro`, `GET /health`.
pub struct AuthClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> AuthClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl<C: HttpClient> AuthApi for AuthClient<C> {
    #[tracing::instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let response: LoginResponse = exchange_json(
            &self.http,
            Method::POST,
            &self.url("/login"),
            Some(credentials),
            "authentication failed",
        )
        .await?;
        info!(token_type = %response.token_type, "Logged in");
        Ok(response)
    }

    #[tracing::instrument(skip_all, fields(email = %account.email))]
    async fn register(&self, account: &RegisterRequest) -> Result<RegisterResponse> {
        let response: RegisterResponse = exchange_json(
            &self.http,
            Method::POST,
            &self.url("/registro"),
            Some(account),
            "registration failed",
        )
        .await?;
        info!(id = response.id, "Account registered");
        Ok(response)
    }

    async fn health(&self) -> bool {
        probe(&self.http, &self.url("/health")).await
    }
}
