// Push channel payloads (inbound events and outbound requests).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::TokenId;

/// Partial quote as pushed by the server: any subset of quote keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotePatch(pub Map<String, Value>);

impl QuotePatch {
    /// Fields ready to merge. The push service names the 24h change
    /// `change_24h`; it is applied to `percent_change_24h` unless the patch
    /// already carries that key.
    pub fn normalized(&self) -> Map<String, Value> {
        let mut fields = self.0.clone();
        if !fields.contains_key("percent_change_24h") {
            if let Some(change) = fields.get("change_24h").cloned() {
                fields.insert("percent_change_24h".to_string(), change);
            }
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// `token_update` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUpdate {
    pub token_id: TokenId,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub data: QuotePatch,
}

/// One entry of a `market_update` broadcast.
///
/// Metrics stay as raw JSON so an explicit `null` can be told apart from a
/// key the server left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTick {
    pub id: TokenId,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

impl MarketTick {
    const METRICS: [(&'static str, &'static str); 3] = [
        ("price", "price"),
        ("velocity", "velocity"),
        ("change_24h", "percent_change_24h"),
    ];

    /// Quote patch with the metrics this tick carries. A missing key leaves
    /// the stored value alone; `null` clears it, as in `token_update`.
    pub fn as_patch(&self) -> QuotePatch {
        let mut fields = Map::new();
        for (wire, quote_key) in Self::METRICS {
            if let Some(value) = self.metrics.get(wire) {
                fields.insert(quote_key.to_string(), value.clone());
            }
        }
        QuotePatch(fields)
    }
}

/// `market_update` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketUpdate {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub tokens: Vec<MarketTick>,
}

/// Outbound `subscribe_token` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSubscription {
    pub token_id: TokenId,
    pub metrics: Vec<String>,
}

/// Outbound `unsubscribe_token` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenUnsubscription {
    pub token_id: TokenId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_update_decodes_service_payload() {
        let update: TokenUpdate = serde_json::from_value(json!({
            "token_id": 3,
            "symbol": "ETH",
            "timestamp": "2024-01-01T00:00:00",
            "data": {"price": 2300.0, "volume_24h": null, "change_24h": 1.5}
        }))
        .unwrap();

        assert_eq!(update.token_id, 3);
        assert_eq!(update.data.len(), 3);
        let fields = update.data.normalized();
        assert_eq!(fields.get("percent_change_24h"), Some(&json!(1.5)));
    }

    #[test]
    fn explicit_percent_change_wins_over_alias() {
        let patch: QuotePatch =
            serde_json::from_value(json!({"change_24h": 1.0, "percent_change_24h": 2.0})).unwrap();
        assert_eq!(patch.normalized().get("percent_change_24h"), Some(&json!(2.0)));
    }

    #[test]
    fn market_tick_patch_skips_missing_metrics() {
        let tick: MarketTick =
            serde_json::from_value(json!({"id": 1, "price": 10.0, "change_24h": -1.0})).unwrap();
        let patch = tick.as_patch();
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.0.get("velocity"), None);
        assert_eq!(patch.0.get("percent_change_24h"), Some(&json!(-1.0)));
    }

    #[test]
    fn market_tick_keeps_explicit_nulls() {
        let tick: MarketTick =
            serde_json::from_value(json!({"id": 1, "symbol": "BTC", "price": 5.0, "velocity": null}))
                .unwrap();
        assert_eq!(tick.symbol.as_deref(), Some("BTC"));
        let patch = tick.as_patch();
        assert_eq!(patch.0.get("velocity"), Some(&Value::Null));
        assert_eq!(patch.0.get("symbol"), None);
    }

    #[test]
    fn subscription_serializes_like_the_client_library() {
        let sub = TokenSubscription {
            token_id: 9,
            metrics: vec!["price".into(), "volume".into()],
        };
        assert_eq!(
            serde_json::to_value(&sub).unwrap(),
            json!({"token_id": 9, "metrics": ["price", "volume"]})
        );
    }
}
