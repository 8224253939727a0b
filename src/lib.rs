#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;
pub mod utils;

use std::time::Duration;

// Re-export commonly used types outside of crate (main.rs, integration tests)
pub use app::App;
pub use config::{DashboardSettings, PERSISTENCE};
pub use error::DashboardError;

use config::API;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// REST API base URL
    #[arg(long, env = "TOKEN_METRICS_API_URL", default_value = API.rest.base_url)]
    pub api_url: String,

    /// Push (Socket.IO) server URL
    #[arg(long, env = "TOKEN_METRICS_WS_URL", default_value = API.push.base_url)]
    pub ws_url: String,

    /// API key sent with every request and on the push handshake
    #[arg(
        long,
        env = "TOKEN_METRICS_API_KEY",
        default_value = API.api_key,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub api_key: String,

    /// Number of tokens to list
    #[arg(long, default_value_t = API.rest.default_limit)]
    pub limit: usize,

    /// Quote currency
    #[arg(long, default_value = API.rest.currency)]
    pub currency: String,

    /// Seconds between automatic refreshes
    #[arg(long, default_value_t = API.rest.refresh_interval.as_secs())]
    pub refresh_secs: u64,

    /// Poll only; do not open the push channel
    #[arg(long, default_value_t = false)]
    pub no_live: bool,
}

impl Cli {
    /// Validate the arguments into runtime settings.
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            api_base_url: self.api_url.trim_end_matches('/').to_string(),
            push_base_url: self.ws_url.trim_end_matches('/').to_string(),
            api_key: self.api_key.clone(),
            limit: self.limit.clamp(1, API.rest.max_limit),
            currency: self.currency.to_uppercase(),
            refresh_interval: Duration::from_secs(self.refresh_secs.max(1)),
            live_updates: !self.no_live,
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    let settings = args.settings();
    log::info!(
        "Starting dashboard against {} (live updates: {})",
        settings.api_base_url,
        settings.live_updates
    );
    App::new(cc, settings)
}
