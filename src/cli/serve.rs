use std::net::SocketAddr;

use crate::{api::AppState, config::Config, error, info, server::start_api_server, warning};

pub async fn serve(config: Config, addr: Option<SocketAddr>, open: bool) {
    let addr = addr.unwrap_or(config.server_addr);

    // Credentials are only needed once the consent flow starts
    if let Err(e) = config.credentials() {
        warning!("{}. Authentication will fail until it is configured.", e);
    }

    let state = AppState::new(config);
    let server = tokio::spawn(start_api_server(state, addr));

    let url = format!("http://{}/", addr);
    if open {
        if webbrowser::open(&url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            );
        }
    } else {
        info!("Open {} to authenticate with Spotify", url);
    }

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server stopped: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }
}
