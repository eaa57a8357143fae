//! Configuration management for fibtracks.
//!
//! Values come from environment variables, optionally populated from a `.env`
//! file. The resulting [`Config`] is built once at startup and shared read-only
//! (behind an `Arc`) with every handler and CLI command.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/fibtracks/.env`)
//! 4. Application defaults (where applicable)
//!
//! The Spotify credentials are deliberately optional here. A missing client id,
//! secret or redirect URI does not stop the server from starting; it surfaces as
//! [`Error::Configuration`] the first time an OAuth operation needs it.

use std::{env, net::SocketAddr, path::PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SCOPE: &str = "user-library-read user-read-recently-played user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_FIBONACCI_TERMS: usize = 10;

/// Largest term count whose final Fibonacci number still fits in a `u64`.
pub const MAX_FIBONACCI_TERMS: usize = 94;

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then the platform-specific local data
/// directory under `fibtracks/.env`:
/// - Linux: `~/.local/share/fibtracks/.env`
/// - macOS: `~/Library/Application Support/fibtracks/.env`
/// - Windows: `%LOCALAPPDATA%/fibtracks/.env`
///
/// Missing files are not an error. Variables already present in the process
/// environment are never overridden.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> std::result::Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("fibtracks/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::dotenv().ok();
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Process-wide settings, immutable after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
    pub fibonacci_terms: usize,
}

/// Borrowed view of the three OAuth credentials once all are known to be present.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            fibonacci_terms: DEFAULT_FIBONACCI_TERMS,
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Configuration`] when `SERVER_ADDRESS` is not a socket
    /// address or `FIBONACCI_TERMS` is not an integer in `2..=94`. Credentials
    /// are not checked here.
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env().await.ok();
    /// let config = Config::from_env()?;
    /// server::start_api_server(AppState::new(config.clone()), config.server_addr).await?;
    /// ```
    pub fn from_env() -> Result<Self> {
        let server_addr = optional("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| Error::Configuration(format!("invalid SERVER_ADDRESS: {}", e)))?;

        let fibonacci_terms = match optional("FIBONACCI_TERMS") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| Error::Configuration(format!("invalid FIBONACCI_TERMS: {}", e)))?,
            None => DEFAULT_FIBONACCI_TERMS,
        };
        validate_fibonacci_terms(fibonacci_terms)?;

        Ok(Self {
            client_id: optional("SPOTIFY_CLIENT_ID"),
            client_secret: optional("SPOTIFY_CLIENT_SECRET"),
            redirect_uri: optional("SPOTIFY_REDIRECT_URI"),
            scope: optional("SPOTIFY_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: optional("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: optional("SPOTIFY_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: optional("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            server_addr,
            fibonacci_terms,
        })
    }

    /// Returns the OAuth credentials, or a configuration error naming the first
    /// missing variable.
    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let (client_id, client_secret) = self.client_auth()?;
        Ok(Credentials {
            client_id,
            client_secret,
            redirect_uri: required(&self.redirect_uri, "SPOTIFY_REDIRECT_URI")?,
        })
    }

    /// Client id and secret for HTTP Basic authentication against the token
    /// endpoint. Unlike [`Config::credentials`] this does not need a redirect URI.
    pub fn client_auth(&self) -> Result<(&str, &str)> {
        Ok((
            required(&self.client_id, "SPOTIFY_CLIENT_ID")?,
            required(&self.client_secret, "SPOTIFY_CLIENT_SECRET")?,
        ))
    }
}

pub fn validate_fibonacci_terms(terms: usize) -> Result<()> {
    if (2..=MAX_FIBONACCI_TERMS).contains(&terms) {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "FIBONACCI_TERMS must be between 2 and {}, got {}",
            MAX_FIBONACCI_TERMS, terms
        )))
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::Configuration(format!("{} must be set", key)))
}
