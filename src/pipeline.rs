//! The playlist sampling pipeline behind `/generate_playlist` and
//! `fibtracks sample`.
//!
//! Steps run strictly in order, each awaiting the previous one:
//! 1. pick the sample cap from the Fibonacci sequence
//! 2. fetch the user's playlists and take the first one
//! 3. fetch that playlist's tracks
//! 4. fetch audio features for up to `cap` tracks, one request per track
//! 5. label each track by danceability and train the classifier

use reqwest::Client;

use crate::{
    config::Config,
    error::{Error, Result},
    info,
    model::{self, TrainedModel},
    spotify, success,
    types::{FeatureVector, GeneratePlaylistResponse},
    utils, warning,
};

#[derive(Debug, Clone)]
pub struct SampledTrack {
    pub id: String,
    pub name: String,
    pub features: FeatureVector,
    pub label: u8,
}

#[derive(Debug, Clone)]
pub struct PlaylistSample {
    pub playlist_id: String,
    pub playlist_name: String,
    pub playlist_length: u64,
    pub tracks: Vec<SampledTrack>,
    pub model: TrainedModel,
}

impl PlaylistSample {
    pub fn features(&self) -> Vec<FeatureVector> {
        self.tracks.iter().map(|track| track.features).collect()
    }

    pub fn to_response(&self) -> GeneratePlaylistResponse {
        GeneratePlaylistResponse {
            playlist_length: self.playlist_length,
            tracks_sampled: self.tracks.len(),
            track_features: self.features(),
            model_accuracy: format!("{:.4}", self.model.report.accuracy),
        }
    }
}

/// Samples the user's first playlist and trains the classifier on it.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - Configuration; `fibonacci_terms` sets the sample cap
/// * `access_token` - Bearer token from the authorization code exchange
///
/// # Returns
///
/// The playlist sampled, the tracks with their features and labels, and the
/// trained model with its evaluation report.
///
/// # Errors
///
/// - [`Error::EmptyAccessToken`] or [`Error::Configuration`] before any request
///   is sent
/// - [`Error::NoPlaylists`] when the user has no playlists
/// - [`Error::EmptyPlaylist`] when the first playlist has no track with an id
/// - [`Error::Fetch`] for the first non-200 response; later tracks are not fetched
/// - [`Error::Training`] when the sampled tracks cannot train a model
pub async fn generate(client: &Client, config: &Config, access_token: &str) -> Result<PlaylistSample> {
    if access_token.is_empty() {
        return Err(Error::EmptyAccessToken);
    }

    let playlist_length = utils::playlist_length(config.fibonacci_terms).ok_or_else(|| {
        Error::Configuration(format!(
            "{} Fibonacci terms do not define a playlist length",
            config.fibonacci_terms
        ))
    })?;
    let cap = usize::try_from(playlist_length).unwrap_or(usize::MAX);

    let playlists = spotify::playlists::get_user_playlists(client, config, access_token).await?;
    let playlist = playlists.items.into_iter().next().ok_or(Error::NoPlaylists)?;
    info!("Sampling playlist {} ({})", playlist.name, playlist.id);

    let tracks =
        spotify::playlists::get_playlist_tracks(client, config, access_token, &playlist.id).await?;
    let candidates: Vec<(String, String)> = tracks
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(|track| track.id.map(|id| (id, track.name)))
        .take(cap)
        .collect();

    if candidates.is_empty() {
        return Err(Error::EmptyPlaylist(playlist.id));
    }
    if candidates.len() < cap {
        warning!(
            "Playlist {} has {} usable tracks, fewer than the cap of {}",
            playlist.id,
            candidates.len(),
            cap
        );
    }

    let mut sampled = Vec::with_capacity(candidates.len());
    for (id, name) in candidates {
        let features = spotify::features::get_audio_features(client, config, access_token, &id)
            .await?
            .vector();
        sampled.push(SampledTrack {
            label: utils::danceability_label(&features),
            id,
            name,
            features,
        });
    }

    let features: Vec<FeatureVector> = sampled.iter().map(|track| track.features).collect();
    let labels: Vec<u8> = sampled.iter().map(|track| track.label).collect();
    let model = model::train(&features, &labels)?;

    success!(
        "Model accuracy: {:.4} ({} train / {} test)",
        model.report.accuracy,
        model.report.train_size,
        model.report.test_size
    );

    Ok(PlaylistSample {
        playlist_id: playlist.id,
        playlist_name: playlist.name,
        playlist_length,
        tracks: sampled,
        model,
    })
}
