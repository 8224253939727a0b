//! Velocity chart configuration

use eframe::egui::Color32;

pub struct ChartConfig {
    /// One synthetic point per hour.
    pub point_count: usize,
    /// Base used when the token reports no (or zero) velocity.
    pub default_base_velocity: f64,
    /// Total width of the uniform jitter applied around the base.
    pub velocity_jitter: f64,
    pub volume_min: f64,
    pub volume_span: f64,
    pub height: f32,

    pub color_velocity: Color32,
    pub color_volume: Color32,
    pub velocity_line_width: f32,
    pub velocity_marker_radius: f32,
    pub volume_bar_width: f64,
}

pub const CHART: ChartConfig = ChartConfig {
    point_count: 24,
    default_base_velocity: 0.5,
    velocity_jitter: 0.2,
    volume_min: 1000.0,
    volume_span: 10000.0,
    height: 320.0,

    color_velocity: Color32::from_rgb(59, 130, 246), // Blue
    color_volume: Color32::from_rgba_premultiplied(16, 185, 129, 77), // Emerald, ~30% alpha
    velocity_line_width: 3.0,
    velocity_marker_radius: 4.0,
    volume_bar_width: 0.7,
};
