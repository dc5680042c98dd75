// src/middleware/session.rs
//! Persisted bearer token + role, the only client state that outlives a run.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::user::SessionUser;

pub const TOKEN_COOKIE: &str = "jwt_token";
pub const ROLE_COOKIE: &str = "user_role";
pub const COOKIE_TTL_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cookie file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cookie file is not valid json: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Minimal cookie semantics: named values with an expiry.
pub trait CookieJar: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), SessionError>;
    fn remove(&self, name: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

impl StoredCookie {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
        }
    }

    fn live_value(&self, now: DateTime<Utc>) -> Option<String> {
        (now < self.expires_at).then(|| self.value.clone())
    }
}

/// Cookies that live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<HashMap<String, StoredCookie>>,
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        cookies.get(name).and_then(|c| c.live_value(Utc::now()))
    }

    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), SessionError> {
        let mut cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        cookies.insert(name.to_string(), StoredCookie::new(value, ttl));
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), SessionError> {
        let mut cookies = self.cookies.lock().unwrap_or_else(|e| e.into_inner());
        cookies.remove(name);
        Ok(())
    }
}

/// Cookies kept in a JSON file so they survive between runs.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileCookieJar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, StoredCookie>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(HashMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, cookies: &HashMap<String, StoredCookie>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(cookies)?;

        // write beside the target, then swap it in whole
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&tmp)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut HashMap<String, StoredCookie>),
    {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut cookies = match self.load() {
            Ok(cookies) => cookies,
            Err(SessionError::Serde(e)) => {
                warn!("Replacing unreadable cookie file {}: {}", self.path.display(), e);
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        let now = Utc::now();
        cookies.retain(|_, c| c.expires_at > now);
        f(&mut cookies);
        self.store(&cookies)
    }
}

impl CookieJar for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        match self.load() {
            Ok(cookies) => cookies.get(name).and_then(|c| c.live_value(Utc::now())),
            Err(e) => {
                warn!("Ignoring unreadable cookie file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, name: &str, value: &str, ttl: Duration) -> Result<(), SessionError> {
        self.update(|cookies| {
            cookies.insert(name.to_string(), StoredCookie::new(value, ttl));
        })
    }

    fn remove(&self, name: &str) -> Result<(), SessionError> {
        self.update(|cookies| {
            cookies.remove(name);
        })
    }
}

/// What controllers and the API client may know about the signed-in user.
pub trait Session: Send + Sync {
    fn current_token(&self) -> Option<String>;
    fn current_role(&self) -> Option<String>;
    fn clear(&self) -> Result<(), SessionError>;

    fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// Role check only; pair with [`Session::is_authenticated`] to gate pages.
    fn is_admin(&self) -> bool {
        self.current_role()
            .map(SessionUser::new)
            .is_some_and(|u| u.is_admin())
    }

    /// The signed-in user, when both cookies are present.
    fn user(&self) -> Option<SessionUser> {
        self.current_token()?;
        self.current_role().map(SessionUser::new)
    }
}

/// Token + role cookies over any [`CookieJar`].
#[derive(Debug, Default)]
pub struct TokenStore<J> {
    jar: J,
}

impl<J: CookieJar> TokenStore<J> {
    pub fn new(jar: J) -> Self {
        Self { jar }
    }

    pub fn set_auth(&self, token: &str, role: &str) -> Result<(), SessionError> {
        let ttl = Duration::days(COOKIE_TTL_DAYS);
        self.jar.set(TOKEN_COOKIE, token, ttl)?;
        self.jar.set(ROLE_COOKIE, role, ttl)?;
        debug!("Stored session for role {} (token {})", role, mask_token(token));
        Ok(())
    }

    pub fn remove_auth(&self) -> Result<(), SessionError> {
        self.jar.remove(TOKEN_COOKIE)?;
        self.jar.remove(ROLE_COOKIE)
    }

    pub fn get_token(&self) -> Option<String> {
        self.jar.get(TOKEN_COOKIE).filter(|t| !t.is_empty())
    }

    pub fn get_user_role(&self) -> Option<String> {
        self.jar.get(ROLE_COOKIE).filter(|r| !r.is_empty())
    }
}

impl<J: CookieJar> Session for TokenStore<J> {
    fn current_token(&self) -> Option<String> {
        self.get_token()
    }

    fn current_role(&self) -> Option<String> {
        self.get_user_role()
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.remove_auth()
    }
}

/// Keeps only the first and last four characters of a token for logs.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "[REDACTED]".to_string()
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}
