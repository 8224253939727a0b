//! Sync thread feeding the store, with a scripted token source.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use token_metrics::data::{DashboardSync, SyncEvent, SyncHandle, TokenProvider};
use token_metrics::domain::{Quote, Token, TokenId};
use token_metrics::error::Result;
use token_metrics::models::{MarketSummary, TokenStore, filter_tokens};
use token_metrics::{DashboardError, DashboardSettings};

const WAIT: Duration = Duration::from_secs(5);

/// First call succeeds, every later call fails.
struct ScriptedProvider {
    calls: AtomicUsize,
    tokens: Vec<Token>,
}

#[async_trait]
impl TokenProvider for ScriptedProvider {
    async fn fetch_tokens(&self, limit: usize) -> Result<Vec<Token>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(self.tokens.iter().take(limit).cloned().collect())
        } else {
            Err(DashboardError::Protocol("service unavailable".to_string()))
        }
    }
}

fn token(id: TokenId, symbol: &str, name: &str, velocity: f64, market_cap: f64) -> Token {
    Token {
        id,
        cmc_id: None,
        symbol: symbol.to_string(),
        name: name.to_string(),
        slug: None,
        quote: BTreeMap::from([(
            "USD".to_string(),
            Quote {
                price: Some(1.0),
                market_cap: Some(market_cap),
                volume_24h: Some(market_cap / 10.0),
                velocity: Some(velocity),
                ..Default::default()
            },
        )]),
        last_updated: None,
    }
}

fn next_event(handle: &SyncHandle) -> SyncEvent {
    handle
        .recv_timeout(WAIT)
        .expect("sync thread went quiet")
}

fn settings(limit: usize) -> DashboardSettings {
    DashboardSettings {
        limit,
        refresh_interval: Duration::from_secs(3600),
        live_updates: false,
        ..Default::default()
    }
}

#[test]
fn initial_load_then_failed_refresh() {
    let provider = Arc::new(ScriptedProvider {
        calls: AtomicUsize::new(0),
        tokens: vec![
            token(1, "BTC", "Bitcoin", 0.03, 800.0),
            token(2, "ETH", "Ethereum", 0.06, 300.0),
            token(3, "SOL", "Solana", 0.09, 100.0),
        ],
    });
    let mut handle = DashboardSync::spawn_with_provider(settings(2), provider, None);

    assert_eq!(next_event(&handle), SyncEvent::FetchStarted);
    let tokens = match next_event(&handle) {
        SyncEvent::TokensLoaded(tokens) => tokens,
        other => panic!("expected tokens, got {:?}", other),
    };

    let mut store = TokenStore::new("USD");
    store.replace_all(tokens);
    assert_eq!(store.len(), 2);
    assert_eq!(store.selected_id(), Some(1));

    let summary = MarketSummary::from_tokens(store.tokens(), store.currency());
    assert_eq!(summary.token_count, 2);
    assert!((summary.average_velocity - 0.045).abs() < 1e-12);
    assert_eq!(summary.total_market_cap, 1100.0);
    assert_eq!(summary.total_volume_24h, 110.0);

    let matched: Vec<&str> = filter_tokens(store.tokens(), "ether")
        .iter()
        .map(|t| t.symbol.as_str())
        .collect();
    assert_eq!(matched, vec!["ETH"]);

    // A refresh racing the end of the first fetch is skipped, so ask until one starts.
    let started = (0..50).any(|_| {
        assert!(handle.refresh());
        handle.recv_timeout(Duration::from_millis(100)) == Some(SyncEvent::FetchStarted)
    });
    assert!(started, "manual refresh never started");
    assert_eq!(
        next_event(&handle),
        SyncEvent::FetchFailed("Protocol error: service unavailable".to_string())
    );

    handle.shutdown();
    assert!(!handle.is_running());
    assert!(!handle.refresh());
}
