use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use eframe::egui;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

#[cfg(debug_assertions)]
use crate::config::DF;
use crate::config::DashboardSettings;
use crate::data::live_stream::{
    ConnectionStatus, LiveStreamConfig, StreamCommand, run_live_stream_with_reconnect,
};
use crate::data::provider::{RestTokenProvider, TokenProvider};
use crate::domain::{MarketUpdate, Token, TokenId, TokenUpdate};

/// Everything the background side reports to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    FetchStarted,
    TokensLoaded(Vec<Token>),
    FetchFailed(String),
    Connection(ConnectionStatus),
    TokenUpdate(TokenUpdate),
    MarketUpdate(MarketUpdate),
    ServerError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncCommand {
    Refresh,
    Stream(StreamCommand),
}

/// Sending half of the event channel. Wakes the UI after every send.
#[derive(Clone)]
pub struct EventSink {
    tx: Sender<SyncEvent>,
    repaint: Option<egui::Context>,
}

impl EventSink {
    pub fn new(tx: Sender<SyncEvent>, repaint: Option<egui::Context>) -> Self {
        Self { tx, repaint }
    }

    /// False once the UI side has gone away.
    pub fn send(&self, event: SyncEvent) -> bool {
        let delivered = self.tx.send(event).is_ok();
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        delivered
    }
}

/// UI-side handle on the background sync thread.
pub struct SyncHandle {
    commands: Option<UnboundedSender<SyncCommand>>,
    events: Receiver<SyncEvent>,
}

impl SyncHandle {
    /// Ask for an immediate fetch. Ignored while one is already running.
    pub fn refresh(&self) -> bool {
        self.send(SyncCommand::Refresh)
    }

    pub fn subscribe(&self, token_id: TokenId) -> bool {
        self.send(SyncCommand::Stream(StreamCommand::Subscribe(token_id)))
    }

    pub fn unsubscribe(&self, token_id: TokenId) -> bool {
        self.send(SyncCommand::Stream(StreamCommand::Unsubscribe(token_id)))
    }

    pub fn try_recv(&self) -> Option<SyncEvent> {
        self.events.try_recv().ok()
    }

    /// Blocking receive, for callers that are not driven by a frame loop.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SyncEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Closes the command channel; the background thread winds down on its own.
    pub fn shutdown(&mut self) {
        if self.commands.take().is_some() {
            log::info!("Shutting down dashboard sync.");
        }
    }

    pub fn is_running(&self) -> bool {
        self.commands.is_some()
    }

    fn send(&self, cmd: SyncCommand) -> bool {
        match &self.commands {
            Some(tx) => tx.send(cmd).is_ok(),
            None => false,
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub struct DashboardSync;

impl DashboardSync {
    /// Start polling the REST service (and the push channel, when enabled).
    pub fn spawn(settings: DashboardSettings, repaint: Option<egui::Context>) -> SyncHandle {
        Self::start(settings, None, repaint)
    }

    /// Same as [`DashboardSync::spawn`] with a caller-supplied token source.
    pub fn spawn_with_provider(
        settings: DashboardSettings,
        provider: Arc<dyn TokenProvider>,
        repaint: Option<egui::Context>,
    ) -> SyncHandle {
        Self::start(settings, Some(provider), repaint)
    }

    fn start(
        settings: DashboardSettings,
        provider: Option<Arc<dyn TokenProvider>>,
        repaint: Option<egui::Context>,
    ) -> SyncHandle {
        let (event_tx, event_rx) = mpsc::channel();
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let sink = EventSink::new(event_tx, repaint);

        // Spawn a dedicated thread for the runtime
        thread::spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create sync runtime: {}", e);
                    sink.send(SyncEvent::FetchFailed(e.to_string()));
                    return;
                }
            };
            let provider: Arc<dyn TokenProvider> = match provider {
                Some(provider) => provider,
                None => match RestTokenProvider::new(&settings) {
                    Ok(provider) => Arc::new(provider),
                    Err(e) => {
                        log::error!("Failed to build REST client: {}", e);
                        sink.send(SyncEvent::FetchFailed(e.to_string()));
                        return;
                    }
                },
            };
            rt.block_on(run_sync(settings, provider, cmd_rx, sink));
        });

        SyncHandle {
            commands: Some(cmd_tx),
            events: event_rx,
        }
    }
}

/// Poll on a fixed interval, serve manual refreshes, and feed the live stream.
async fn run_sync(
    settings: DashboardSettings,
    provider: Arc<dyn TokenProvider>,
    mut commands: UnboundedReceiver<SyncCommand>,
    sink: EventSink,
) {
    let (stream_tx, stream_rx) = unbounded_channel();
    let live = if settings.live_updates {
        match LiveStreamConfig::from_settings(&settings) {
            Ok(config) => Some(tokio::spawn(run_live_stream_with_reconnect(
                config,
                stream_rx,
                sink.clone(),
            ))),
            Err(e) => {
                log::error!("Live updates disabled: {}", e);
                sink.send(SyncEvent::ServerError(e.to_string()));
                None
            }
        }
    } else {
        log::info!("Live updates disabled by configuration.");
        None
    };

    let mut ticker = interval(settings.refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            // First tick fires immediately: that is the initial load.
            _ = ticker.tick() => {
                start_fetch(&mut in_flight, &provider, settings.limit, &sink);
            }
            cmd = commands.recv() => match cmd {
                Some(SyncCommand::Refresh) => {
                    if start_fetch(&mut in_flight, &provider, settings.limit, &sink) {
                        ticker.reset();
                    }
                }
                Some(SyncCommand::Stream(cmd)) => {
                    // Fails only when live updates are off; nothing to track then.
                    let _ = stream_tx.send(cmd);
                }
                None => break,
            },
        }
    }

    drop(stream_tx);
    if let Some(handle) = in_flight {
        handle.abort();
    }
    if let Some(handle) = live {
        let _ = tokio::time::timeout(Duration::from_secs(2), handle).await;
    }
}

/// Spawn a fetch unless one is still running. Returns whether one started.
fn start_fetch(
    in_flight: &mut Option<JoinHandle<()>>,
    provider: &Arc<dyn TokenProvider>,
    limit: usize,
    sink: &EventSink,
) -> bool {
    if in_flight.as_ref().is_some_and(|handle| !handle.is_finished()) {
        #[cfg(debug_assertions)]
        if DF.log_fetches {
            log::info!("Fetch already in progress, skipping.");
        }
        return false;
    }

    let provider = Arc::clone(provider);
    let sink = sink.clone();
    *in_flight = Some(tokio::spawn(async move {
        sink.send(SyncEvent::FetchStarted);
        match provider.fetch_tokens(limit).await {
            Ok(tokens) => {
                #[cfg(debug_assertions)]
                if DF.log_fetches {
                    log::info!("Fetched {} tokens", tokens.len());
                }
                sink.send(SyncEvent::TokensLoaded(tokens));
            }
            Err(e) => {
                log::error!("Failed to fetch tokens: {}", e);
                sink.send(SyncEvent::FetchFailed(e.to_string()));
            }
        }
    }));
    true
}
