// src/repositories/auth_repo.rs
use log::info;

use crate::dtos::auth::{SignupIn, SignupOut};
use crate::services::api_client::{ApiClient, ApiError};

#[derive(Clone)]
pub struct AuthRepo {
    api: ApiClient,
}

impl AuthRepo {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/signup`; returns the server's message when it sends one.
    pub async fn signup(&self, email: &str, password: &str) -> Result<Option<String>, ApiError> {
        let body = SignupIn {
            email: email.to_string(),
            password: password.to_string(),
        };
        let out: Option<SignupOut> = self.api.post("/auth/signup", &body).await?;
        info!("Account created for {}", email);
        Ok(out.and_then(|o| o.message))
    }
}
