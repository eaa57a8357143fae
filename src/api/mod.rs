//! # API Module
//!
//! HTTP handlers for the fibtracks web server.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`, link to the Spotify consent screen
//! - [`callback`] - `GET /callback?code=…`, exchanges the code and returns the
//!   access token as plain text
//! - [`generate_playlist`] - `GET /generate_playlist?access_token=…`, samples the
//!   user's first playlist and returns features plus model accuracy as JSON
//! - [`health`] - `GET /health`, status and version
//!
//! Handlers return [`crate::error::Result`]; the error type converts itself to a
//! 400 for missing query parameters and a plain-text 500 for everything else.
//!
//! ## State
//!
//! [`AppState`] is attached to the router as an `Extension`. It holds the
//! immutable configuration, one shared HTTP client, and the PKCE verifiers of
//! authorizations that have been started but not yet called back.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::config::Config;

mod callback;
mod health;
mod playlist;

pub use callback::{callback, index};
pub use health::health;
pub use playlist::generate_playlist;

/// Most authorizations kept waiting for a callback at once.
pub const MAX_PENDING_AUTHORIZATIONS: usize = 256;

/// PKCE code verifiers keyed by the OAuth `state` they were issued with.
///
/// Consent screens that are opened but never completed would otherwise grow the
/// map without bound. Once [`MAX_PENDING_AUTHORIZATIONS`] entries are held, the
/// oldest one is evicted for each new authorization; a callback for an evicted
/// `state` is still exchanged, just without a verifier.
#[derive(Debug, Default)]
pub struct PendingAuthorizations {
    verifiers: HashMap<String, String>,
    order: VecDeque<String>,
}

impl PendingAuthorizations {
    /// Remembers `code_verifier` for `state`, evicting the oldest entries if the
    /// map is full.
    pub fn insert(&mut self, state: String, code_verifier: String) {
        if self.verifiers.contains_key(&state) {
            self.order.retain(|s| *s != state);
        }
        while self.verifiers.len() >= MAX_PENDING_AUTHORIZATIONS {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.verifiers.remove(&oldest);
        }
        self.order.push_back(state.clone());
        self.verifiers.insert(state, code_verifier);
    }

    /// Removes and returns the verifier for `state` so it cannot be replayed.
    pub fn take(&mut self, state: &str) -> Option<String> {
        let verifier = self.verifiers.remove(state)?;
        self.order.retain(|s| s != state);
        Some(verifier)
    }

    pub fn contains(&self, state: &str) -> bool {
        self.verifiers.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.verifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verifiers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
    pub pending: Arc<Mutex<PendingAuthorizations>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: Config, client: Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
            pending: Arc::new(Mutex::new(PendingAuthorizations::default())),
        }
    }
}
