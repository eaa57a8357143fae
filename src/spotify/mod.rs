//! # Spotify Integration Module
//!
//! Thin async wrappers over the parts of the Spotify Web API fibtracks needs.
//! Every function takes the shared [`reqwest::Client`] and the immutable
//! [`Config`](crate::config::Config) explicitly; nothing here reads ambient state.
//!
//! ## Modules
//!
//! - [`auth`] - consent-screen URL, authorization code exchange and token refresh
//!   against `POST /api/token` (HTTP Basic client authentication)
//! - [`playlists`] - `GET /me/playlists` and `GET /playlists/{id}/tracks`
//! - [`features`] - `GET /audio-features/{id}`
//!
//! ## Error Handling
//!
//! Calls are made once. A non-200 from the token endpoint becomes
//! [`Error::Token`]; a non-200 from a resource endpoint becomes [`Error::Fetch`]
//! carrying the status and the URL queried. There is no retry, pagination or
//! rate-limit handling.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

pub mod auth;
pub mod features;
pub mod playlists;

/// Issues an authenticated GET and deserializes a 200 response body.
async fn get_json<T: DeserializeOwned>(client: &Client, api_url: &str, token: &str) -> Result<T> {
    if token.is_empty() {
        return Err(Error::EmptyAccessToken);
    }

    let response = client.get(api_url).bearer_auth(token).send().await?;

    if response.status() != StatusCode::OK {
        return Err(Error::Fetch {
            status: response.status().as_u16(),
            endpoint: api_url.to_string(),
        });
    }

    Ok(response.json::<T>().await?)
}
