use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    error::{Error, Result},
    spotify, success,
};

use super::AppState;

/// Renders a link to the Spotify consent screen and remembers the PKCE verifier
/// for the generated `state`.
pub async fn index(Extension(state): Extension<AppState>) -> Result<Html<String>> {
    let request = spotify::auth::authorization_request(&state.config)?;

    state
        .pending
        .lock()
        .await
        .insert(request.state, request.code_verifier);

    Ok(Html(format!(
        "<h2><a href=\"{}\">Authenticate with Spotify</a></h2>",
        request.url.replace('&', "&amp;")
    )))
}

/// Completes the authorization code flow and hands the access token back to the
/// caller. Nothing is stored server-side.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Result<String> {
    let code = params
        .get("code")
        .filter(|code| !code.is_empty())
        .ok_or(Error::MissingParameter("Authorization code is missing."))?;

    let verifier = match params.get("state") {
        Some(key) => state.pending.lock().await.take(key),
        None => None,
    };

    let token =
        spotify::auth::exchange_code(&state.client, &state.config, code, verifier.as_deref())
            .await?;
    success!("Authorization code exchanged for an access token");

    Ok(format!("Access token: {}", token.access_token))
}
