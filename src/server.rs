use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};

use crate::{
    api::{self, AppState},
    error::Result,
    info,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/callback", get(api::callback))
        .route("/generate_playlist", get(api::generate_playlist))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

pub async fn start_api_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
