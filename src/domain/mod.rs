// Domain types and value objects
mod envelope;
mod messages;
mod token;

pub use envelope::{ApiEnvelope, ApiStatus, Pagination};
pub use messages::{
    MarketTick, MarketUpdate, QuotePatch, TokenSubscription, TokenUnsubscription, TokenUpdate,
};
pub use token::{Quote, Token, TokenId, VelocityTrend};
