use std::sync::LazyLock;

// Plain unicode glyphs: they render with egui's bundled fonts.
pub const ICON_TREND_UP: &str = "\u{25b2}"; // ▲
pub const ICON_TREND_DOWN: &str = "\u{25bc}"; // ▼
pub const ICON_ACTIVITY: &str = "\u{25c6}"; // ◆
pub const ICON_REFRESH: &str = "\u{27f3}"; // ⟳
pub const ICON_DOT: &str = "\u{25cf}"; // ●
pub const ICON_SEARCH: &str = "\u{1f50d}";
pub const ICON_WARNING: &str = "\u{26a0}";
pub const ICON_KEYBOARD: &str = "\u{2328}";

pub struct UiText {
    // --- Header ---
    pub app_title: String,
    pub app_subtitle: String,
    pub label_last_update: String,
    pub btn_refresh: String,
    pub conn_live: String,
    pub conn_connecting: String,
    pub conn_offline: String,

    // --- Overview cards ---
    pub card_total_tokens: String,
    pub card_avg_velocity: String,
    pub card_total_market_cap: String,
    pub card_volume_24h: String,

    // --- Token list ---
    pub list_heading: String,
    pub search_hint: String,
    pub list_empty: String,
    pub list_no_match: String,

    // --- Detail card ---
    pub detail_change_24h: String,
    pub detail_change_7d: String,
    pub detail_market_cap: String,
    pub detail_volume_24h: String,
    pub detail_velocity: String,
    pub detail_trend: String,
    pub detail_select_prompt: String,

    // --- Chart ---
    pub chart_title: String,
    pub chart_velocity: String,
    pub chart_volume: String,
    pub chart_x_axis: String,

    // --- Loading screen ---
    pub ls_title: String,
    pub ls_loading: String,

    // --- Status bar ---
    pub status_showing: String,
    pub status_tokens: String,
    pub status_refresh_every: String,
    pub status_fetch_failed: String,
    pub status_push_error: String,

    // --- Keyboard Shortcuts Pane ---
    pub kbs_name_long: String,
    pub kbs_heading: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Token Metrics Dashboard".to_string(),
    app_subtitle: "Real-time cryptocurrency velocity & metrics".to_string(),
    label_last_update: "Last update:".to_string(),
    btn_refresh: format!("{} Refresh", ICON_REFRESH),
    conn_live: format!("{} Live", ICON_DOT),
    conn_connecting: format!("{} Connecting", ICON_DOT),
    conn_offline: format!("{} Offline", ICON_DOT),

    card_total_tokens: "Total Tokens".to_string(),
    card_avg_velocity: "Avg Velocity".to_string(),
    card_total_market_cap: "Total Market Cap".to_string(),
    card_volume_24h: "24h Volume".to_string(),

    list_heading: "Tokens".to_string(),
    search_hint: format!("{} Search tokens...", ICON_SEARCH),
    list_empty: "No tokens loaded yet.".to_string(),
    list_no_match: "No tokens match your search.".to_string(),

    detail_change_24h: "24h Change".to_string(),
    detail_change_7d: "7d Change".to_string(),
    detail_market_cap: "Market Cap".to_string(),
    detail_volume_24h: "24h Volume".to_string(),
    detail_velocity: "Velocity".to_string(),
    detail_trend: "Trend".to_string(),
    detail_select_prompt: "Select a token to view details".to_string(),

    chart_title: "Velocity Trend (24h)".to_string(),
    chart_velocity: "Velocity".to_string(),
    chart_volume: "Volume".to_string(),
    chart_x_axis: "Hours ago".to_string(),

    ls_title: "TOKEN METRICS".to_string(),
    ls_loading: "Loading token metrics...".to_string(),

    status_showing: "Showing".to_string(),
    status_tokens: "tokens".to_string(),
    status_refresh_every: "Refresh every".to_string(),
    status_fetch_failed: format!("{} Fetch failed:", ICON_WARNING),
    status_push_error: format!("{} Push:", ICON_WARNING),

    kbs_name_long: format!("{} Keyboard Shortcuts", ICON_KEYBOARD),
    kbs_heading: "Press a key to run the command listed".to_string(),
});
