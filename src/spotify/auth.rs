use chrono::Utc;
use reqwest::{Client, StatusCode, Url};

use crate::{
    config::Config,
    error::{Error, Result},
    types::{Token, TokenResponse},
    utils,
};

/// Everything needed to send a user to the consent screen and later complete
/// the exchange for the same authorization.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub code_verifier: String,
}

/// Builds the Spotify consent-screen URL for the authorization code flow.
///
/// A fresh `state` and PKCE code verifier are generated per call. The caller
/// keeps the verifier keyed by `state` so the callback can present it during
/// [`exchange_code`].
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the client id or redirect URI is not set,
/// or if the configured authorization URL cannot be parsed.
///
/// # Example
///
/// ```
/// let request = authorization_request(&config)?;
/// pending.lock().await.insert(request.state.clone(), request.code_verifier.clone());
/// println!("Open {}", request.url);
/// ```
pub fn authorization_request(config: &Config) -> Result<AuthorizationRequest> {
    let credentials = config.credentials()?;
    let state = utils::generate_state();
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", credentials.client_id),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri),
            ("scope", config.scope.as_str()),
            ("state", state.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
        ],
    )
    .map_err(|e| Error::Configuration(format!("invalid SPOTIFY_AUTH_URL: {}", e)))?;

    Ok(AuthorizationRequest {
        url: url.into(),
        state,
        code_verifier,
    })
}

/// Exchanges an authorization code for an access and refresh token.
///
/// Sends `grant_type=authorization_code` with the code and redirect URI to the
/// token endpoint, authenticated with HTTP Basic credentials built from the
/// client id and secret. When the authorization was started with PKCE the
/// matching `code_verifier` is sent as well.
///
/// # Errors
///
/// - [`Error::Configuration`] when a credential is missing; nothing is sent.
/// - [`Error::Token`] with the status code for any non-200 response.
/// - [`Error::Http`] for network failures or an unreadable body.
///
/// No retry is attempted; the failure is terminal for the calling request.
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    code: &str,
    code_verifier: Option<&str>,
) -> Result<Token> {
    let credentials = config.credentials()?;

    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", credentials.redirect_uri),
    ];
    if let Some(verifier) = code_verifier {
        form.push(("code_verifier", verifier));
    }

    let response = request_token(client, config, &form).await?;
    Ok(token_from_response(response, None))
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may or may not rotate the refresh token; when the response carries
/// none, the one passed in is kept on the returned [`Token`].
pub async fn refresh_access_token(
    client: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token> {
    let form = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    let response = request_token(client, config, &form).await?;
    Ok(token_from_response(response, Some(refresh_token)))
}

async fn request_token(
    client: &Client,
    config: &Config,
    form: &[(&str, &str)],
) -> Result<TokenResponse> {
    let (client_id, client_secret) = config.client_auth()?;

    let res = client
        .post(&config.token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(form)
        .send()
        .await?;

    if res.status() != StatusCode::OK {
        return Err(Error::Token {
            status: res.status().as_u16(),
        });
    }

    Ok(res.json::<TokenResponse>().await?)
}

fn token_from_response(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string)),
        token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scope: response.scope.unwrap_or_default(),
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
