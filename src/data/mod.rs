mod live_stream;
mod provider;
pub mod socket_io;
mod sync;

pub use {
    live_stream::{ConnectionStatus, LiveStreamConfig, StreamCommand, run_live_stream_with_reconnect},
    provider::{RestTokenProvider, TokenProvider},
    sync::{DashboardSync, EventSink, SyncEvent, SyncHandle},
};
