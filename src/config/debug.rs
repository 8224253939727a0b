//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Every decoded push frame (very noisy).
    pub log_push_frames: bool,

    /// token_update / market_update merges into the store.
    pub log_store_merges: bool,

    /// REST fetch start/finish with token counts.
    pub log_fetches: bool,

    /// Subscribe / unsubscribe traffic and replays after reconnect.
    pub log_subscriptions: bool,

    /// Anything about handling the selected token.
    pub log_selection: bool,
}

pub const DF: LogFlags = LogFlags {
    log_fetches: true,
    log_subscriptions: true,
    log_selection: false,

    log_store_merges: false,
    log_push_frames: false,
};
