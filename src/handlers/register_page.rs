// src/handlers/register_page.rs
use std::sync::{Arc, LazyLock};

use log::{error, info, warn};
use regex::Regex;

use crate::handlers::notice::Notice;
use crate::middleware::navigator::Navigator;
use crate::repositories::auth_repo::AuthRepo;
use crate::services::api_client::{ApiClient, ApiError};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters";
pub const REGISTERED_MESSAGE: &str = "Registration successful! Please login.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").ok());

fn looks_like_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// Rejected before any request went out.
    Invalid,
}

/// Sign-up screen: email plus a confirmed password.
pub struct RegisterPage {
    repo: AuthRepo,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    notice: Option<Notice>,
    loading: bool,
}

impl RegisterPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            navigator: api.navigator().clone(),
            login_path: api.login_path().to_string(),
            repo: AuthRepo::new(api),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            notice: None,
            loading: false,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// First failing client-side check, if any.
    pub fn check(&self) -> Option<&'static str> {
        if self.password != self.confirm_password {
            return Some(PASSWORD_MISMATCH_MESSAGE);
        }
        if !looks_like_email(self.email.trim()) {
            return Some(INVALID_EMAIL_MESSAGE);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Some(SHORT_PASSWORD_MESSAGE);
        }
        None
    }

    pub async fn submit(&mut self) -> Result<RegisterOutcome, ApiError> {
        self.notice = None;
        if let Some(message) = self.check() {
            warn!("Registration rejected locally: {}", message);
            self.notice = Some(Notice::error(message));
            return Ok(RegisterOutcome::Invalid);
        }

        self.loading = true;
        let email = self.email.trim().to_lowercase();
        let result = self.repo.signup(&email, &self.password).await;
        self.loading = false;

        match result {
            Ok(message) => {
                info!("Registered {}", email);
                let message = message.unwrap_or_else(|| REGISTERED_MESSAGE.to_string());
                self.notice = Some(Notice::success(message));
                self.password.clear();
                self.confirm_password.clear();
                self.navigator.navigate(&self.login_path);
                Ok(RegisterOutcome::Registered)
            }
            Err(e) => {
                error!("Registration failed for {}: {}", email, e);
                let message = e.server_message().unwrap_or(REGISTER_FAILED_MESSAGE);
                self.notice = Some(Notice::error(message));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::navigator::HistoryNavigator;
    use crate::middleware::session::{MemoryCookieJar, TokenStore};

    fn page(email: &str, password: &str, confirm: &str) -> RegisterPage {
        let api = ApiClient::new(
            "http://127.0.0.1:9/api",
            Arc::new(TokenStore::new(MemoryCookieJar::default())),
            Arc::new(HistoryNavigator::default()),
        );
        let mut page = RegisterPage::new(api);
        page.email = email.into();
        page.password = password.into();
        page.confirm_password = confirm.into();
        page
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("budi@contoh.co.id"));
        assert!(looks_like_email("Ani.Putri+hr@mail.com"));
        assert!(!looks_like_email("budi@"));
        assert!(!looks_like_email("budi.contoh.com"));
    }

    #[test]
    fn mismatch_is_reported_first() {
        let p = page("bad", "abc", "abd");
        assert_eq!(p.check(), Some(PASSWORD_MISMATCH_MESSAGE));
    }

    #[test]
    fn short_password_rejected() {
        let p = page("budi@contoh.com", "12345", "12345");
        assert_eq!(p.check(), Some(SHORT_PASSWORD_MESSAGE));
        let p = page("budi@contoh.com", "123456", "123456");
        assert_eq!(p.check(), None);
    }

    #[tokio::test]
    async fn invalid_input_sends_nothing() {
        let mut p = page("budi", "rahasia", "rahasia");
        let outcome = p.submit().await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Invalid);
        assert_eq!(p.notice().unwrap().message, INVALID_EMAIL_MESSAGE);
    }
}
