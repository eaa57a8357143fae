use reqwest::Client;

use crate::{config::Config, error, info, spotify, success};

use super::spinner;

pub async fn refresh(config: Config, refresh_token: String) {
    let pb = spinner("Refreshing access token...");

    let client = Client::new();
    let token = match spotify::auth::refresh_access_token(&client, &config, &refresh_token).await {
        Ok(token) => token,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to refresh access token: {}", e);
        }
    };
    pb.finish_and_clear();

    success!(
        "Access token refreshed, valid for {} seconds",
        token.expires_in
    );
    println!("{}", token.access_token);

    if let Some(rotated) = token.refresh_token.filter(|r| *r != refresh_token) {
        info!("Spotify issued a new refresh token: {}", rotated);
    }
}
