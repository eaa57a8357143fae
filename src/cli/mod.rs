//! # CLI Module
//!
//! Command implementations behind the `fibtracks` binary. Each command takes the
//! already-loaded [`Config`](crate::config::Config) by value and reports through
//! the crate's `info!`/`success!`/`warning!`/`error!` macros; fatal failures exit
//! the process with status 1.
//!
//! - [`serve`] - run the HTTP server, optionally opening the browser at `/`
//! - [`refresh`] - trade a refresh token for a new access token
//! - [`sample`] - run the playlist pipeline and print a feature table
//!
//! ```bash
//! fibtracks serve --open
//! fibtracks sample --access-token BQC...
//! fibtracks refresh AQD...
//! ```

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

mod refresh;
mod sample;
mod serve;

pub use refresh::refresh;
pub use sample::sample;
pub use serve::serve;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
