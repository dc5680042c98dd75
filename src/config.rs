use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_COOKIE_FILE: &str = ".biodata-cookies.json";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub cookie_file: PathBuf,
    pub login_path: String,
}

impl Config {
    /// Reads the process environment (call `dotenv` first to honour `.env`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        // NEXT_PUBLIC_API_URL is what the web build reads; accept it too
        let api_url = non_blank("BIODATA_API_URL")
            .or_else(|| non_blank("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let parsed = reqwest::Url::parse(&api_url)
            .with_context(|| format!("BIODATA_API_URL is not a valid URL: {}", api_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("BIODATA_API_URL must be http or https, got {}", parsed.scheme());
        }

        let cookie_file = non_blank("BIODATA_COOKIE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COOKIE_FILE));

        let login_path = non_blank("BIODATA_LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        if !login_path.starts_with('/') {
            bail!("BIODATA_LOGIN_PATH must start with '/', got {}", login_path);
        }

        info!("API base URL: {}", api_url);
        Ok(Self {
            api_url,
            cookie_file,
            login_path,
        })
    }
}
