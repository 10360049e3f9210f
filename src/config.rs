use crate::storage::resolve_session_path;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the hotel API, without a trailing slash.
    pub api_base_url: String,
    pub session_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_base_url = env::var("HOTEL_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::new(port, &api_base_url, resolve_session_path())
    }

    pub fn new(port: u16, api_base_url: &str, session_path: PathBuf) -> Self {
        Self {
            port,
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            session_path,
        }
    }
}
