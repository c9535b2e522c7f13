use async_trait::async_trait;
use campusdesk_models::{ErrorResponse, LoginRequest, LoginResponse, UserProfile};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiErrorKind};

/// The server calls the session core depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// The "who am I" query answered from the ambient session cookie.
    async fn current_user(&self) -> Result<UserProfile, ApiError>;
}

/// [`AuthApi`] over HTTP. The session cookie lives in reqwest's cookie store
/// and is never visible to callers.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    base: Url,
    client: reqwest::Client,
}

impl HttpAuthApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(base_url, client)
    }

    /// Uses a caller-built client, e.g. one with a timeout. It must have a
    /// cookie store enabled for sessions to work.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::transport(format!("Invalid base URL: {}", e)))?;
        Ok(Self { base, client })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::transport(format!("Invalid path {}: {}", path, e)))
    }

    /// GETs any JSON endpoint with the current session.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path)?)
            .send()
            .await
            .map_err(transport)?;

        decode(classify(response, ApiErrorKind::Unauthenticated).await?).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::transport("Request timed out")
    } else {
        ApiError::transport(err.to_string())
    }
}

/// Turns a non-success response into an [`ApiError`]. `on_401` is the kind
/// a 401 means for this call: a rejected login or a missing session.
async fn classify(response: Response, on_401: ApiErrorKind) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    let kind = match status {
        StatusCode::UNAUTHORIZED => on_401,
        StatusCode::FORBIDDEN => ApiErrorKind::Unauthorized,
        _ => ApiErrorKind::Transport,
    };

    Err(ApiError::new(kind, message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::transport(format!("Unexpected response body: {}", e)))
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/api/auth/login")?)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let login: LoginResponse =
            decode(classify(response, ApiErrorKind::CredentialRejected).await?).await?;
        Ok(login.user)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout")?)
            .send()
            .await
            .map_err(transport)?;

        classify(response, ApiErrorKind::Unauthenticated).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("/api/auth/me").await
    }
}
