mod filter;
mod store;
mod summary;
mod velocity_series;

pub use {
    filter::{filter_tokens, matches},
    store::{SelectionChange, TokenStore},
    summary::MarketSummary,
    velocity_series::{VelocityPoint, VelocitySeries, base_velocity, generate_velocity_series},
};
