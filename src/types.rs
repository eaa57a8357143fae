use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Number of audio attributes fed to the classifier.
pub const FEATURE_COUNT: usize = 3;

/// `[danceability, energy, tempo]` for one track.
pub type FeatureVector = [f64; FEATURE_COUNT];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A playlist entry. `track` is null for removed items; `track.id` is null for
/// local files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub id: Option<String>,
    pub danceability: f64,
    pub energy: f64,
    pub tempo: f64,
}

impl AudioFeatures {
    pub fn vector(&self) -> FeatureVector {
        [self.danceability, self.energy, self.tempo]
    }
}

/// JSON body returned by `/generate_playlist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlaylistResponse {
    pub playlist_length: u64,
    pub tracks_sampled: usize,
    pub track_features: Vec<FeatureVector>,
    pub model_accuracy: String,
}

#[derive(Tabled)]
pub struct FeatureTableRow {
    pub track: String,
    pub danceability: String,
    pub energy: String,
    pub tempo: String,
    pub label: u8,
}
