use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::Display;

use crate::domain::QuotePatch;

pub type TokenId = u64;

static EMPTY_QUOTE: LazyLock<Quote> = LazyLock::new(Quote::default);

/// Velocity direction label computed by the service from its recent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "title_case")]
pub enum VelocityTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
    #[serde(other)]
    Unknown,
}

/// Metrics for one token in one currency.
///
/// The service sends `null` for zero or missing values, so every metric is
/// optional. Keys we do not model are kept in `extra` so that merging a push
/// patch never silently drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub percent_change_1h: Option<f64>,
    #[serde(default)]
    pub percent_change_24h: Option<f64>,
    #[serde(default)]
    pub percent_change_7d: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub velocity_trend: Option<VelocityTrend>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    /// Shallow, last-write-wins merge of `patch` into this quote.
    ///
    /// An explicit `null` in the patch clears the field. If the merged object
    /// no longer decodes (e.g. a string where a number belongs) the quote is
    /// left untouched and the error is returned.
    pub fn merge(&mut self, patch: &QuotePatch) -> Result<(), serde_json::Error> {
        let mut fields = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch.normalized() {
            fields.insert(key, value);
        }
        *self = serde_json::from_value(Value::Object(fields))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    #[serde(default)]
    pub cmc_id: Option<u64>,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Quote keyed by currency code, e.g. `"USD"`.
    #[serde(default)]
    pub quote: BTreeMap<String, Quote>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Token {
    pub fn quote_in(&self, currency: &str) -> Option<&Quote> {
        self.quote.get(currency)
    }

    /// Borrowed quote, or an empty one when the currency is missing.
    pub fn quote_or_empty(&self, currency: &str) -> &Quote {
        self.quote_in(currency).unwrap_or(&EMPTY_QUOTE)
    }

    pub fn quote_in_mut(&mut self, currency: &str) -> &mut Quote {
        self.quote.entry(currency.to_string()).or_default()
    }
}
