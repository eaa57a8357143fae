use reqwest::Client;

use crate::{
    config::Config,
    error::Result,
    types::{GetPlaylistTracksResponse, GetUserPlaylistsResponse},
};

use super::get_json;

/// Retrieves the current user's playlists (first page only).
///
/// Uses `GET /me/playlists`. Pagination is not followed.
///
/// # Errors
///
/// [`crate::error::Error::Fetch`] with the status and endpoint for any non-200
/// response; [`crate::error::Error::EmptyAccessToken`] if `token` is empty.
pub async fn get_user_playlists(
    client: &Client,
    config: &Config,
    token: &str,
) -> Result<GetUserPlaylistsResponse> {
    let api_url = format!("{uri}/me/playlists", uri = config.api_url);
    get_json(client, &api_url, token).await
}

/// Retrieves the first page of tracks in a playlist via
/// `GET /playlists/{playlist_id}/tracks`.
pub async fn get_playlist_tracks(
    client: &Client,
    config: &Config,
    token: &str,
    playlist_id: &str,
) -> Result<GetPlaylistTracksResponse> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config.api_url,
        id = playlist_id
    );
    get_json(client, &api_url, token).await
}
