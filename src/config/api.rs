use std::time::Duration;

/// REST endpoint defaults.
pub struct RestConfig {
    pub base_url: &'static str,
    pub tokens_path: &'static str,
    pub api_key_header: &'static str,
    pub default_limit: usize,
    /// The service caps `limit` at this value.
    pub max_limit: usize,
    pub currency: &'static str,
    pub timeout: Duration,
    pub refresh_interval: Duration,
}

/// Push channel (Socket.IO) defaults.
pub struct PushConfig {
    pub base_url: &'static str,
    pub socket_path: &'static str,
    pub subscribed_metrics: &'static [&'static str],
    pub initial_reconnect_delay_sec: u64,
    pub max_reconnect_delay_sec: u64,
    /// Used until the server's open handshake tells us its real ping window.
    pub fallback_ping_window: Duration,
}

pub struct ApiConfig {
    pub api_key: &'static str,
    pub rest: RestConfig,
    pub push: PushConfig,
}

pub const API: ApiConfig = ApiConfig {
    api_key: "demo-api-key-12345678",
    rest: RestConfig {
        base_url: "http://localhost:5000/api/v1",
        tokens_path: "tokens",
        api_key_header: "X-API-Key",
        default_limit: 20,
        max_limit: 1000,
        currency: "USD",
        timeout: Duration::from_secs(10),
        refresh_interval: Duration::from_secs(5 * 60),
    },
    push: PushConfig {
        base_url: "http://localhost:5000",
        socket_path: "socket.io/",
        subscribed_metrics: &["price", "volume", "velocity"],
        initial_reconnect_delay_sec: 1,
        max_reconnect_delay_sec: 30,
        fallback_ping_window: Duration::from_secs(45),
    },
};
