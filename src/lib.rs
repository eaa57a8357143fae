//! fibtracks library
//!
//! Authenticates against the Spotify Web API with the authorization code flow,
//! samples the tracks of a user's first playlist (as many as the tenth Fibonacci
//! number by default), and fits a small random forest that predicts whether a
//! track is danceable from its audio features.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web server
//! - `cli` - command implementations for the binary
//! - `config` - configuration from the environment and `.env` files
//! - `error` - the crate-wide error type
//! - `model` - train/test split, decision trees and the random forest
//! - `pipeline` - fetch, label and train sequence shared by the API and CLI
//! - `server` - router construction and the listening loop
//! - `spotify` - token endpoint and Web API client functions
//! - `types` - Spotify payloads and response types
//! - `utils` - PKCE helpers, the Fibonacci sequence and labelling
//!
//! # Example
//!
//! ```
//! use fibtracks::{api::AppState, config::{self, Config}, server};
//!
//! #[tokio::main]
//! async fn main() -> fibtracks::error::Result<()> {
//!     config::load_env().await.ok();
//!     let config = Config::from_env()?;
//!     let addr = config.server_addr;
//!     server::start_api_server(AppState::new(config), addr).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

// Console logging. Every line is prefixed with a colored marker: `o` info,
// `✓` success, `!` warning (yellow) or error (red). Warnings and errors go to
// stderr so they stay visible when stdout is piped.

/// Prints an informational line.
///
/// ```
/// info!("Sampling playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line confirming that a step completed.
///
/// ```
/// success!("Model accuracy: {:.4}", accuracy);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a recoverable problem to stderr.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a fatal error to stderr and exits with status 1.
///
/// Only the binary's command layer uses this; library code returns
/// [`error::Error`] instead.
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
