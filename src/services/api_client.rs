// src/services/api_client.rs
use std::sync::Arc;

use log::{debug, error, warn};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::{Config, DEFAULT_LOGIN_PATH};
use crate::dtos::biodata::{ErrorBody, ServerFieldError};
use crate::middleware::navigator::Navigator;
use crate::middleware::session::Session;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("session expired")]
    Unauthorized,
    #[error("not found")]
    NotFound { message: Option<String> },
    #[error("request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
        errors: Vec<ServerFieldError>,
    },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The human message the server attached, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } | ApiError::NotFound { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn field_errors(&self) -> &[ServerFieldError] {
        match self {
            ApiError::Rejected { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// The one HTTP client every page goes through.
///
/// Attaches `Authorization: Bearer <token>` while a session exists. A `401`
/// from any endpoint clears the session and navigates to the login page, and
/// the caller still receives [`ApiError::Unauthorized`].
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    login_path: String,
    session: Arc<dyn Session>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            session,
            navigator,
        }
    }

    pub fn from_config(
        config: &Config,
        session: Arc<dyn Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(config.api_url.clone(), session, navigator).with_login_path(&config.login_path)
    }

    pub fn with_login_path(mut self, path: &str) -> Self {
        self.login_path = path.to_string();
        self
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = builder.send().await.map_err(|e| {
            error!("Request failed before a response: {}", e);
            ApiError::Http(e)
        })?;

        let status = resp.status();
        let url = resp.url().path().to_string();
        let text = resp.text().await?;
        debug!("{} {}", status.as_u16(), url);

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound {
                    message: body.message,
                });
            }
            warn!("{} rejected with {}: {}", url, status.as_u16(), text);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: body.message,
                errors: body.errors,
            });
        }

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }

    fn expire_session(&self) {
        warn!("Session rejected by the API, signing out");
        if let Err(e) = self.session.clear() {
            error!("Failed to clear session cookies: {}", e);
        }
        self.navigator.navigate(&self.login_path);
    }
}
