//! Push session against a loopback Socket.IO-speaking WebSocket server.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::{Instant, sleep, timeout};
use tokio_tungstenite::{WebSocketStream, accept_async, tungstenite::Message};
use token_metrics::data::{
    ConnectionStatus, EventSink, LiveStreamConfig, StreamCommand, SyncEvent,
    run_live_stream_with_reconnect,
};

const OPEN: &str = r#"0{"sid":"engine-sid","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

async fn bind() -> (TcpListener, LiveStreamConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = LiveStreamConfig {
        endpoint: format!("ws://{}/socket.io/?EIO=4&transport=websocket", addr),
        api_key: "test-key".to_string(),
        metrics: vec!["price".into(), "volume".into(), "velocity".into()],
    };
    (listener, config)
}

async fn accept(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    accept_async(stream).await.unwrap()
}

/// Next text frame from the client, skipping pongs.
async fn next_text(ws: &mut WebSocketStream<TcpStream>) -> String {
    loop {
        let msg = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("client went quiet")
            .expect("client hung up")
            .unwrap();
        if let Message::Text(text) = msg {
            if !text.as_str().starts_with('3') {
                return text.as_str().to_string();
            }
        }
    }
}

async fn wait_for(rx: &Receiver<SyncEvent>, pred: impl Fn(&SyncEvent) -> bool) -> SyncEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        while let Ok(event) = rx.try_recv() {
            if pred(&event) {
                return event;
            }
        }
        assert!(Instant::now() < deadline, "timed out waiting for sync event");
        sleep(Duration::from_millis(10)).await;
    }
}

/// Next text frame from the client, pongs included.
async fn next_raw_text(ws: &mut WebSocketStream<TcpStream>) -> String {
    loop {
        let msg = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("client went quiet")
            .expect("client hung up")
            .unwrap();
        if let Message::Text(text) = msg {
            return text.as_str().to_string();
        }
    }
}

async fn accept_within(listener: &TcpListener, limit: Duration) -> WebSocketStream<TcpStream> {
    timeout(limit, accept(listener))
        .await
        .expect("client did not reconnect")
}

fn event_json(frame: &str) -> Value {
    let body = frame.strip_prefix("42").expect("not an event frame");
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn session_authenticates_subscribes_and_forwards_updates() {
    let (listener, config) = bind().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        ws.send(Message::text(OPEN)).await.unwrap();
        let connect = next_text(&mut ws).await;
        ws.send(Message::text(r#"40{"sid":"socket-sid"}"#)).await.unwrap();
        ws.send(Message::text(r#"42["connected",{"message":"Connected to Token Metrics API"}]"#))
            .await
            .unwrap();

        let subscribe = next_text(&mut ws).await;
        ws.send(Message::text(
            r#"42["token_update",{"token_id":7,"symbol":"SOL","timestamp":"2024-01-01T00:00:00Z","data":{"price":101.5,"change_24h":3.2}}]"#,
        ))
        .await
        .unwrap();

        let goodbye = next_text(&mut ws).await;
        (connect, subscribe, goodbye)
    });

    let (event_tx, event_rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = unbounded_channel();
    cmd_tx.send(StreamCommand::Subscribe(7)).unwrap();
    let client = tokio::spawn(run_live_stream_with_reconnect(
        config,
        cmd_rx,
        EventSink::new(event_tx, None),
    ));

    wait_for(&event_rx, |e| {
        *e == SyncEvent::Connection(ConnectionStatus::Connected)
    })
    .await;
    let update = match wait_for(&event_rx, |e| matches!(e, SyncEvent::TokenUpdate(_))).await {
        SyncEvent::TokenUpdate(update) => update,
        other => panic!("unexpected event {:?}", other),
    };
    assert_eq!(update.token_id, 7);
    assert_eq!(update.symbol.as_deref(), Some("SOL"));
    assert_eq!(update.data.normalized().get("percent_change_24h"), Some(&json!(3.2)));

    drop(cmd_tx);
    timeout(Duration::from_secs(5), client)
        .await
        .expect("stream did not stop")
        .unwrap();

    let (connect, subscribe, goodbye) = server.await.unwrap();
    assert_eq!(connect, r#"40{"api_key":"test-key"}"#);
    assert_eq!(
        event_json(&subscribe),
        json!(["subscribe_token", { "token_id": 7, "metrics": ["price", "volume", "velocity"] }])
    );
    assert_eq!(goodbye, "41");
}

#[tokio::test]
async fn refused_connect_surfaces_server_error() {
    let (listener, config) = bind().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        ws.send(Message::text(OPEN)).await.unwrap();
        let _connect = next_text(&mut ws).await;
        ws.send(Message::text(r#"44{"message":"Invalid API key"}"#))
            .await
            .unwrap();
    });

    let (event_tx, event_rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = unbounded_channel();
    let client = tokio::spawn(run_live_stream_with_reconnect(
        config,
        cmd_rx,
        EventSink::new(event_tx, None),
    ));

    let error = wait_for(&event_rx, |e| matches!(e, SyncEvent::ServerError(_))).await;
    assert_eq!(error, SyncEvent::ServerError("Invalid API key".to_string()));
    wait_for(&event_rx, |e| {
        *e == SyncEvent::Connection(ConnectionStatus::Disconnected)
    })
    .await;
    server.await.unwrap();

    // Closing the command channel ends the backoff wait as well.
    drop(cmd_tx);
    timeout(Duration::from_secs(5), client)
        .await
        .expect("stream did not stop during backoff")
        .unwrap();
}

#[tokio::test]
async fn reconnect_replays_subscriptions_and_answers_pings() {
    let (listener, config) = bind().await;
    let server = tokio::spawn(async move {
        // Round 1: refuse the connect so the client backs off and doubles its delay.
        let mut ws = accept(&listener).await;
        ws.send(Message::text(OPEN)).await.unwrap();
        let _connect = next_text(&mut ws).await;
        ws.send(Message::text(r#"44{"message":"try later"}"#))
            .await
            .unwrap();
        drop(ws);

        // Round 2 (and 3): accept, ping, then drop the socket after the replayed subscribe.
        let mut rounds = Vec::new();
        let mut dropped_at = None;
        for _ in 0..2 {
            let mut ws = accept_within(&listener, Duration::from_secs(5)).await;
            let reconnect_after = dropped_at.map(|t: Instant| t.elapsed());
            ws.send(Message::text(OPEN)).await.unwrap();
            let connect = next_raw_text(&mut ws).await;
            ws.send(Message::text(r#"40{"sid":"socket-sid"}"#)).await.unwrap();
            let subscribe = next_raw_text(&mut ws).await;
            ws.send(Message::text("2")).await.unwrap();
            let pong = next_raw_text(&mut ws).await;
            drop(ws);
            dropped_at = Some(Instant::now());
            rounds.push((vec![connect, pong, subscribe], reconnect_after));
        }
        rounds
    });

    let (event_tx, event_rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = unbounded_channel();
    cmd_tx.send(StreamCommand::Subscribe(7)).unwrap();
    let client = tokio::spawn(run_live_stream_with_reconnect(
        config,
        cmd_rx,
        EventSink::new(event_tx, None),
    ));

    let rounds = timeout(Duration::from_secs(15), server)
        .await
        .expect("server rounds did not finish")
        .unwrap();
    wait_for(&event_rx, |e| {
        *e == SyncEvent::Connection(ConnectionStatus::Connected)
    })
    .await;

    drop(cmd_tx);
    timeout(Duration::from_secs(5), client)
        .await
        .expect("stream did not stop")
        .unwrap();

    let expected_subscribe =
        json!(["subscribe_token", { "token_id": 7, "metrics": ["price", "volume", "velocity"] }]);
    for (frames, _) in &rounds {
        assert_eq!(frames[0], r#"40{"api_key":"test-key"}"#);
        assert_eq!(frames[1], "3");
        assert_eq!(event_json(&frames[2]), expected_subscribe);
    }

    // A session that got connected resets the delay to the initial 1s,
    // not the 2s left over from the refused attempt.
    let reconnect_after = rounds[1].1.expect("second round timing");
    assert!(
        reconnect_after < Duration::from_millis(1800),
        "reconnect took {:?}",
        reconnect_after
    );
}
