use reqwest::Client;

use crate::{config::Config, error::Result, types::AudioFeatures};

use super::get_json;

/// Retrieves the audio features of a single track via
/// `GET /audio-features/{track_id}`.
pub async fn get_audio_features(
    client: &Client,
    config: &Config,
    token: &str,
    track_id: &str,
) -> Result<AudioFeatures> {
    let api_url = format!(
        "{uri}/audio-features/{id}",
        uri = config.api_url,
        id = track_id
    );
    get_json(client, &api_url, token).await
}
