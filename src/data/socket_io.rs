//! Minimal Engine.IO v4 / Socket.IO v5 codec for the push channel.
//!
//! Only the text framing used over a plain WebSocket transport is supported.
//! Binary packets (attachments) are reported as protocol errors.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::API;
use crate::error::{DashboardError, Result};

const ENGINE_IO_QUERY: &str = "EIO=4&transport=websocket";

/// Handshake carried by the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings.
    pub ping_interval: u64,
    /// Milliseconds the server waits for our pong.
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

impl Handshake {
    /// How long we may go without hearing anything before the link is dead.
    pub fn silence_limit(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

/// Socket.IO packet carried inside an Engine.IO `message`.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        ack_id: Option<u64>,
        name: String,
        payload: Value,
    },
    Ack {
        namespace: String,
        ack_id: u64,
        data: Value,
    },
    ConnectError {
        namespace: String,
        data: Value,
    },
}

/// Decode one WebSocket text frame.
pub fn decode(frame: &str) -> Result<EnginePacket> {
    let mut chars = frame.chars();
    let kind = chars
        .next()
        .ok_or_else(|| DashboardError::Protocol("empty frame".to_string()))?;
    let rest = chars.as_str();

    match kind {
        '0' => Ok(EnginePacket::Open(serde_json::from_str(rest)?)),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(rest.to_string())),
        '3' => Ok(EnginePacket::Pong(rest.to_string())),
        '4' => Ok(EnginePacket::Message(decode_socket_packet(rest)?)),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(DashboardError::Protocol(format!(
            "unknown engine packet type '{}'",
            other
        ))),
    }
}

fn decode_socket_packet(body: &str) -> Result<SocketPacket> {
    let mut chars = body.chars();
    let kind = chars
        .next()
        .ok_or_else(|| DashboardError::Protocol("empty socket packet".to_string()))?;
    let mut rest = chars.as_str();

    if kind == '5' || kind == '6' {
        return Err(DashboardError::Protocol(
            "binary socket packets are not supported".to_string(),
        ));
    }

    let mut namespace = "/".to_string();
    if rest.starts_with('/') {
        let end = rest.find(',').unwrap_or(rest.len());
        namespace = rest[..end].to_string();
        rest = rest.get(end + 1..).unwrap_or("");
    }

    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    let ack_id = if digits > 0 {
        let id = rest[..digits]
            .parse::<u64>()
            .map_err(|e| DashboardError::Protocol(format!("bad ack id: {}", e)))?;
        rest = &rest[digits..];
        Some(id)
    } else {
        None
    };

    let data = if rest.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(rest)?)
    };

    match kind {
        '0' => Ok(SocketPacket::Connect { namespace, data }),
        '1' => Ok(SocketPacket::Disconnect { namespace }),
        '2' => {
            let (name, payload) = split_event(data)?;
            Ok(SocketPacket::Event {
                namespace,
                ack_id,
                name,
                payload,
            })
        }
        '3' => Ok(SocketPacket::Ack {
            namespace,
            ack_id: ack_id
                .ok_or_else(|| DashboardError::Protocol("ack without id".to_string()))?,
            data: data.unwrap_or(Value::Null),
        }),
        '4' => Ok(SocketPacket::ConnectError {
            namespace,
            data: data.unwrap_or(Value::Null),
        }),
        other => Err(DashboardError::Protocol(format!(
            "unknown socket packet type '{}'",
            other
        ))),
    }
}

/// `[name, payload, ...]` into the event name and its first argument.
fn split_event(data: Option<Value>) -> Result<(String, Value)> {
    let Some(Value::Array(mut items)) = data else {
        return Err(DashboardError::Protocol(
            "event payload is not an array".to_string(),
        ));
    };
    if items.is_empty() {
        return Err(DashboardError::Protocol("event without a name".to_string()));
    }
    let payload = if items.len() > 1 {
        items.swap_remove(1)
    } else {
        Value::Null
    };
    match items.swap_remove(0) {
        Value::String(name) => Ok((name, payload)),
        other => Err(DashboardError::Protocol(format!(
            "event name is not a string: {}",
            other
        ))),
    }
}

/// Socket.IO connect on the default namespace, with an auth object.
pub fn encode_connect(auth: &Value) -> String {
    format!("40{}", auth)
}

/// Socket.IO disconnect on the default namespace.
pub fn encode_disconnect() -> String {
    "41".to_string()
}

pub fn encode_event<T: Serialize>(name: &str, data: &T) -> Result<String> {
    let frame = serde_json::to_string(&(name, data))?;
    Ok(format!("42{}", frame))
}

/// Engine.IO pong echoing the ping's payload (empty outside upgrade probes).
pub fn encode_pong(payload: &str) -> String {
    format!("3{}", payload)
}

/// WebSocket endpoint for a push server origin.
///
/// `http(s)://host[:port]` becomes `ws(s)://host[:port]/socket.io/?EIO=4&transport=websocket`.
/// A path on the base names a Socket.IO namespace, which the service does not
/// use, so it is dropped.
pub fn push_endpoint(base: &str) -> Result<String> {
    let mut url = Url::parse(base.trim())
        .map_err(|e| DashboardError::InvalidUrl(format!("{}: {}", base, e)))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(DashboardError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, base
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| DashboardError::InvalidUrl(base.to_string()))?;
    url.set_path(&format!("/{}", API.push.socket_path));
    url.set_query(Some(ENGINE_IO_QUERY));
    url.set_fragment(None);

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_open_handshake() {
        let packet = decode(
            r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#,
        )
        .unwrap();
        let EnginePacket::Open(handshake) = packet else {
            panic!("expected open packet");
        };
        assert_eq!(handshake.sid, "abc");
        assert_eq!(handshake.silence_limit(), Duration::from_secs(45));
    }

    #[test]
    fn decodes_event_with_payload() {
        let packet = decode(r#"42["token_update",{"token_id":1,"data":{"price":2.0}}]"#).unwrap();
        assert_eq!(
            packet,
            EnginePacket::Message(SocketPacket::Event {
                namespace: "/".into(),
                ack_id: None,
                name: "token_update".into(),
                payload: json!({"token_id": 1, "data": {"price": 2.0}}),
            })
        );
    }

    #[test]
    fn decodes_namespace_and_ack_id() {
        let packet = decode(r#"42/admin,17["error",{"message":"nope"}]"#).unwrap();
        let EnginePacket::Message(SocketPacket::Event {
            namespace,
            ack_id,
            name,
            ..
        }) = packet
        else {
            panic!("expected event");
        };
        assert_eq!(namespace, "/admin");
        assert_eq!(ack_id, Some(17));
        assert_eq!(name, "error");
    }

    #[test]
    fn event_without_argument_has_null_payload() {
        let packet = decode(r#"42["market_subscribed"]"#).unwrap();
        let EnginePacket::Message(SocketPacket::Event { payload, .. }) = packet else {
            panic!("expected event");
        };
        assert_eq!(payload, Value::Null);
    }

    #[test]
    fn decodes_connect_ack_and_control_packets() {
        assert_eq!(
            decode(r#"40{"sid":"s1"}"#).unwrap(),
            EnginePacket::Message(SocketPacket::Connect {
                namespace: "/".into(),
                data: Some(json!({"sid": "s1"})),
            })
        );
        assert_eq!(decode("2").unwrap(), EnginePacket::Ping(String::new()));
        assert_eq!(decode("1").unwrap(), EnginePacket::Close);
        assert_eq!(decode("6").unwrap(), EnginePacket::Noop);
        assert!(matches!(
            decode(r#"44{"message":"unauthorized"}"#).unwrap(),
            EnginePacket::Message(SocketPacket::ConnectError { .. })
        ));
    }

    #[test]
    fn rejects_binary_and_garbage() {
        assert!(matches!(
            decode(r#"451-["upload",{"_placeholder":true,"num":0}]"#),
            Err(DashboardError::Protocol(_))
        ));
        assert!(decode("").is_err());
        assert!(decode("9").is_err());
        assert!(decode(r#"42{"not":"an array"}"#).is_err());
    }

    #[test]
    fn encodes_outbound_frames() {
        assert_eq!(
            encode_connect(&json!({"api_key": "k"})),
            r#"40{"api_key":"k"}"#
        );
        assert_eq!(
            encode_event("subscribe_token", &json!({"token_id": 4})).unwrap(),
            r#"42["subscribe_token",{"token_id":4}]"#
        );
        assert_eq!(encode_pong(""), "3");
        assert_eq!(encode_pong("probe"), "3probe");
    }

    #[test]
    fn push_endpoint_maps_scheme_and_path() {
        assert_eq!(
            push_endpoint("http://localhost:5000").unwrap(),
            "ws://localhost:5000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            push_endpoint("https://metrics.example.com/").unwrap(),
            "wss://metrics.example.com/socket.io/?EIO=4&transport=websocket"
        );
        assert!(matches!(
            push_endpoint("ftp://example.com"),
            Err(DashboardError::InvalidUrl(_))
        ));
        assert!(push_endpoint("not a url").is_err());
    }
}
