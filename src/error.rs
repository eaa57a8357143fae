//! Error types shared by the OAuth flow, the Spotify fetchers, the classifier
//! and the HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::warning;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token request failed: {status}")]
    Token { status: u16 },

    #[error("Failed to fetch {endpoint}: {status}")]
    Fetch { status: u16, endpoint: String },

    #[error("Model training failed: {0}")]
    Training(#[from] TrainingError),

    #[error("An access token is required for Spotify API requests")]
    EmptyAccessToken,

    #[error("The user has no playlists")]
    NoPlaylists,

    #[error("Playlist {0} has no tracks with audio features")]
    EmptyPlaylist(String),

    #[error("{0}")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingError {
    #[error("no samples to train on")]
    NoSamples,

    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("{0} samples leave nothing to train on after the evaluation split")]
    TooFewSamples(usize),

    #[error("training data contains only class {0}")]
    SingleClass(u8),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MissingParameter(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            other => {
                warning!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred: {}", other),
                )
                    .into_response()
            }
        }
    }
}
