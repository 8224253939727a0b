//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod api;
mod chart;
mod debug;
mod persistence;
mod settings;

// Re-export commonly used items
pub use api::API;
pub use chart::CHART;
pub use debug::DF;
pub use persistence::PERSISTENCE;
pub use settings::DashboardSettings;
