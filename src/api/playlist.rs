use std::collections::HashMap;

use axum::{Extension, Json, extract::Query};

use crate::{
    error::{Error, Result},
    pipeline,
    types::GeneratePlaylistResponse,
};

use super::AppState;

/// Handles `GET /generate_playlist?access_token=<token>`.
///
/// Runs the sampling pipeline for the caller's first playlist and returns the
/// sampled feature rows together with the classifier's held-out accuracy.
///
/// # Arguments
///
/// * `params` - Query parameters; `access_token` must be present and non-empty
/// * `state` - Shared application state with the configuration and HTTP client
///
/// # Returns
///
/// `200` with a JSON body such as
///
/// ```json
/// {
///   "playlist_length": 34,
///   "tracks_sampled": 34,
///   "track_features": [[0.8, 0.7, 120.0], [0.2, 0.3, 95.0]],
///   "model_accuracy": "0.8571"
/// }
/// ```
///
/// # Errors
///
/// - `400` when `access_token` is missing; no outbound request is made
/// - `500` for any token, fetch or training failure downstream
pub async fn generate_playlist(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Result<Json<GeneratePlaylistResponse>> {
    let access_token = params
        .get("access_token")
        .filter(|token| !token.is_empty())
        .ok_or(Error::MissingParameter("Access token is required."))?;

    let sample = pipeline::generate(&state.client, &state.config, access_token).await?;
    Ok(Json(sample.to_response()))
}
