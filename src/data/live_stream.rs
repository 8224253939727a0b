use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, sleep, sleep_until, timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

#[cfg(debug_assertions)]
use crate::config::DF;
use crate::config::{API, DashboardSettings};
use crate::data::socket_io::{self, EnginePacket, SocketPacket};
use crate::data::sync::{EventSink, SyncEvent};
use crate::domain::{MarketUpdate, TokenId, TokenSubscription, TokenUnsubscription, TokenUpdate};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    #[default]
    Disconnected,
}

/// Requests the UI forwards to the push session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamCommand {
    Subscribe(TokenId),
    Unsubscribe(TokenId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveStreamConfig {
    pub endpoint: String,
    pub api_key: String,
    pub metrics: Vec<String>,
}

impl LiveStreamConfig {
    pub fn from_settings(settings: &DashboardSettings) -> crate::error::Result<Self> {
        Ok(Self {
            endpoint: socket_io::push_endpoint(&settings.push_base_url)?,
            api_key: settings.api_key.clone(),
            metrics: API
                .push
                .subscribed_metrics
                .iter()
                .map(|m| m.to_string())
                .collect(),
        })
    }
}

/// How a session that got past the handshake came to an end.
#[derive(Debug, Clone, PartialEq)]
enum SessionEnd {
    /// Command channel closed: the dashboard is going away.
    Shutdown,
    /// Server sent a close or disconnect.
    ServerClosed,
    /// Transport dropped or went silent.
    Lost(String),
}

/// Keeps a push session alive until the command channel closes.
///
/// Subscriptions requested while disconnected are remembered and replayed on
/// the next successful connect.
pub async fn run_live_stream_with_reconnect(
    config: LiveStreamConfig,
    mut commands: UnboundedReceiver<StreamCommand>,
    sink: EventSink,
) {
    let mut desired: BTreeSet<TokenId> = BTreeSet::new();
    let mut reconnect_delay = API.push.initial_reconnect_delay_sec;

    loop {
        sink.send(SyncEvent::Connection(ConnectionStatus::Connecting));

        #[cfg(debug_assertions)]
        if DF.log_subscriptions {
            log::info!("Attempting connection to push channel {}...", config.endpoint);
        }

        let outcome = run_live_session(&config, &mut commands, &mut desired, &sink).await;
        sink.send(SyncEvent::Connection(ConnectionStatus::Disconnected));

        match outcome {
            Ok(SessionEnd::Shutdown) => {
                log::info!("Push channel shut down.");
                return;
            }
            Ok(SessionEnd::ServerClosed) => {
                log::warn!("Push channel closed by server. Reconnecting...");
                reconnect_delay = API.push.initial_reconnect_delay_sec;
            }
            Ok(SessionEnd::Lost(reason)) => {
                log::warn!("Push channel lost: {}. Reconnecting...", reason);
                reconnect_delay = API.push.initial_reconnect_delay_sec;
            }
            Err(e) => {
                log::error!(
                    "Push channel connection failed: {:#}. Retrying in {}s...",
                    e,
                    reconnect_delay
                );
            }
        }

        // Back off, but keep tracking subscription changes and notice teardown.
        let backoff = sleep(Duration::from_secs(reconnect_delay));
        tokio::pin!(backoff);
        loop {
            tokio::select! {
                _ = &mut backoff => break,
                cmd = commands.recv() => match cmd {
                    Some(cmd) => {
                        apply_command(&mut desired, cmd);
                    }
                    None => return,
                },
            }
        }
        reconnect_delay = (reconnect_delay * 2).min(API.push.max_reconnect_delay_sec);
    }
}

async fn run_live_session(
    config: &LiveStreamConfig,
    commands: &mut UnboundedReceiver<StreamCommand>,
    desired: &mut BTreeSet<TokenId>,
    sink: &EventSink,
) -> Result<SessionEnd> {
    let (ws_stream, _) = timeout(API.rest.timeout, connect_async(config.endpoint.as_str()))
        .await
        .context("timed out opening WebSocket")?
        .context("WebSocket handshake failed")?;
    let (mut write, mut read) = ws_stream.split();

    let handshake = match next_packet(&mut read, API.push.fallback_ping_window).await? {
        EnginePacket::Open(handshake) => handshake,
        other => bail!("expected Engine.IO open packet, got {:?}", other),
    };
    let silence_limit = handshake.silence_limit();

    send_frame(
        &mut write,
        socket_io::encode_connect(&json!({ "api_key": config.api_key })),
    )
    .await?;

    loop {
        match next_packet(&mut read, silence_limit).await? {
            EnginePacket::Ping(payload) => {
                send_frame(&mut write, socket_io::encode_pong(&payload)).await?
            }
            EnginePacket::Message(SocketPacket::Connect { .. }) => break,
            EnginePacket::Message(SocketPacket::ConnectError { data, .. }) => {
                let reason = error_message(&data);
                sink.send(SyncEvent::ServerError(reason.clone()));
                bail!("server refused connection: {}", reason);
            }
            EnginePacket::Close => bail!("server closed during connect"),
            _other => {
                #[cfg(debug_assertions)]
                if DF.log_push_frames {
                    log::info!("[push] ignoring {:?} before connect ack", _other);
                }
            }
        }
    }

    sink.send(SyncEvent::Connection(ConnectionStatus::Connected));
    log::info!("Push channel connected (sid {}).", handshake.sid);

    for &token_id in desired.iter() {
        send_subscription(&mut write, config, StreamCommand::Subscribe(token_id)).await?;
    }
    #[cfg(debug_assertions)]
    if DF.log_subscriptions && !desired.is_empty() {
        log::info!("Replayed {} subscription(s) after connect", desired.len());
    }

    let mut deadline = Instant::now() + silence_limit;
    loop {
        tokio::select! {
            _ = sleep_until(deadline) => {
                return Ok(SessionEnd::Lost(format!(
                    "no traffic for {}s",
                    silence_limit.as_secs()
                )));
            }
            frame = read.next() => {
                deadline = Instant::now() + silence_limit;
                let text = match frame {
                    None => return Ok(SessionEnd::Lost("stream ended".to_string())),
                    Some(Err(e)) => return Ok(SessionEnd::Lost(e.to_string())),
                    Some(Ok(Message::Close(_))) => return Ok(SessionEnd::ServerClosed),
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(_)) => continue,
                };
                let packet = match socket_io::decode(text.as_str()) {
                    Ok(packet) => packet,
                    Err(e) => {
                        log::warn!("⚠️ Skipping malformed push frame: {}", e);
                        continue;
                    }
                };
                if let Some(end) = handle_packet(packet, &mut write, sink).await? {
                    return Ok(end);
                }
            }
            cmd = commands.recv() => match cmd {
                Some(cmd) => {
                    if apply_command(desired, cmd) {
                        send_subscription(&mut write, config, cmd).await?;
                    }
                }
                None => {
                    let _ = send_frame(&mut write, socket_io::encode_disconnect()).await;
                    let _ = write.close().await;
                    return Ok(SessionEnd::Shutdown);
                }
            },
        }
    }
}

async fn handle_packet(
    packet: EnginePacket,
    write: &mut WsSink,
    sink: &EventSink,
) -> Result<Option<SessionEnd>> {
    match packet {
        EnginePacket::Ping(payload) => {
            send_frame(write, socket_io::encode_pong(&payload)).await?;
        }
        EnginePacket::Close | EnginePacket::Message(SocketPacket::Disconnect { .. }) => {
            return Ok(Some(SessionEnd::ServerClosed));
        }
        EnginePacket::Message(SocketPacket::Event { name, payload, .. }) => {
            #[cfg(debug_assertions)]
            if DF.log_push_frames {
                log::info!("[push] {} {}", name, payload);
            }
            if let Some(event) = interpret_event(&name, payload) {
                sink.send(event);
            }
        }
        EnginePacket::Message(SocketPacket::ConnectError { data, .. }) => {
            sink.send(SyncEvent::ServerError(error_message(&data)));
        }
        EnginePacket::Open(_) => log::warn!("⚠️ Unexpected second open packet on push channel"),
        EnginePacket::Pong(_)
        | EnginePacket::Upgrade
        | EnginePacket::Noop
        | EnginePacket::Message(SocketPacket::Connect { .. })
        | EnginePacket::Message(SocketPacket::Ack { .. }) => {}
    }
    Ok(None)
}

/// Map a server event onto what the dashboard cares about.
///
/// Acknowledgement events only get logged; unknown events are ignored.
pub(crate) fn interpret_event(name: &str, payload: Value) -> Option<SyncEvent> {
    match name {
        "token_update" => match serde_json::from_value::<TokenUpdate>(payload) {
            Ok(update) => Some(SyncEvent::TokenUpdate(update)),
            Err(e) => {
                log::warn!("⚠️ Dropping malformed token_update: {}", e);
                None
            }
        },
        "market_update" => {
            if payload.is_null() {
                return Some(SyncEvent::MarketUpdate(MarketUpdate::default()));
            }
            match serde_json::from_value::<MarketUpdate>(payload) {
                Ok(update) => Some(SyncEvent::MarketUpdate(update)),
                Err(e) => {
                    log::warn!("⚠️ Dropping malformed market_update: {}", e);
                    None
                }
            }
        }
        "error" => Some(SyncEvent::ServerError(error_message(&payload))),
        "connected" | "subscribed" | "unsubscribed" | "market_subscribed" => {
            #[cfg(debug_assertions)]
            if DF.log_subscriptions {
                log::info!("[push] {}: {}", name, payload);
            }
            None
        }
        _ => {
            log::debug!("Ignoring unknown push event '{}'", name);
            None
        }
    }
}

fn error_message(payload: &Value) -> String {
    payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| payload.to_string())
}

/// Record a command in the desired set; true when it changed anything.
fn apply_command(desired: &mut BTreeSet<TokenId>, cmd: StreamCommand) -> bool {
    let changed = match cmd {
        StreamCommand::Subscribe(id) => desired.insert(id),
        StreamCommand::Unsubscribe(id) => desired.remove(&id),
    };
    #[cfg(debug_assertions)]
    if DF.log_subscriptions && changed {
        log::info!("{:?} (now tracking {} token(s))", cmd, desired.len());
    }
    changed
}

async fn send_subscription(
    write: &mut WsSink,
    config: &LiveStreamConfig,
    cmd: StreamCommand,
) -> Result<()> {
    let frame = match cmd {
        StreamCommand::Subscribe(token_id) => socket_io::encode_event(
            "subscribe_token",
            &TokenSubscription {
                token_id,
                metrics: config.metrics.clone(),
            },
        )?,
        StreamCommand::Unsubscribe(token_id) => {
            socket_io::encode_event("unsubscribe_token", &TokenUnsubscription { token_id })?
        }
    };
    send_frame(write, frame).await
}

async fn send_frame(write: &mut WsSink, frame: String) -> Result<()> {
    write
        .send(Message::text(frame))
        .await
        .context("failed to send push frame")
}

/// Next decodable packet, or an error once `limit` passes in silence.
async fn next_packet(read: &mut WsSource, limit: Duration) -> Result<EnginePacket> {
    loop {
        let frame = timeout(limit, read.next())
            .await
            .map_err(|_| anyhow!("no traffic for {}s", limit.as_secs()))?;
        match frame {
            None => bail!("stream ended"),
            Some(Err(e)) => return Err(e).context("WebSocket error"),
            Some(Ok(Message::Text(text))) => match socket_io::decode(text.as_str()) {
                Ok(packet) => return Ok(packet),
                Err(e) => log::warn!("⚠️ Skipping malformed push frame: {}", e),
            },
            Some(Ok(Message::Close(_))) => bail!("server closed the WebSocket"),
            Some(Ok(_)) => {}
        }
    }
}
