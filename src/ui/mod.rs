mod format;
mod screens;
mod shortcuts;
mod styles;
mod ui_cards;
mod ui_config;
mod ui_panels;
mod ui_plot_view;
mod ui_render;
mod ui_text;

pub use format::{format_currency, format_number, format_percent_change, format_velocity};

pub(crate) use screens::render_bootstrap;
pub(crate) use shortcuts::Shortcut;
pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub use ui_plot_view::VelocityChart;
