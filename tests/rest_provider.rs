//! REST provider against a throwaway loopback HTTP server.

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use token_metrics::data::{RestTokenProvider, TokenProvider};
use token_metrics::{DashboardError, DashboardSettings};

/// Answer exactly one request with `status_line` and `body`; the task yields
/// the raw request head it received.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).to_lowercase()
    });
    (format!("http://{}/api/v1", addr), handle)
}

fn settings(api_base_url: String) -> DashboardSettings {
    DashboardSettings {
        api_base_url,
        api_key: "test-key".to_string(),
        live_updates: false,
        ..Default::default()
    }
}

#[tokio::test]
async fn fetch_decodes_tokens_and_sends_api_key() {
    let body = json!({
        "status": { "timestamp": "2024-01-01T00:00:00Z", "error_code": 0, "error_message": null },
        "data": [
            {
                "id": 1, "symbol": "BTC", "name": "Bitcoin",
                "quote": { "USD": {
                    "price": 43250.5, "percent_change_24h": 2.5, "market_cap": 845000000000.0,
                    "volume_24h": 28000000000.0, "velocity": 0.0331, "velocity_trend": "increasing"
                } }
            },
            {
                "id": 2, "symbol": "ETH", "name": "Ethereum",
                "quote": { "USD": { "price": 2300.0, "velocity": null } }
            }
        ],
        "pagination": { "total_count": 2, "page": 1, "per_page": 2, "total_pages": 1 }
    })
    .to_string();
    let (base, server) = serve_once("200 OK", body).await;

    let provider = RestTokenProvider::new(&settings(base)).unwrap();
    let tokens = provider.fetch_tokens(2).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("get /api/v1/tokens?limit=2&convert=usd "));
    assert!(request.contains("x-api-key: test-key"));

    let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTC", "ETH"]);
    let btc = tokens[0].quote_or_empty("USD");
    assert_eq!(btc.price, Some(43250.5));
    assert_eq!(btc.velocity, Some(0.0331));
    assert_eq!(tokens[1].quote_or_empty("USD").velocity, None);
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let body = json!({
        "status": { "error_code": 401, "error_message": "Invalid API key" },
        "data": null
    })
    .to_string();
    let (base, server) = serve_once("401 Unauthorized", body).await;

    let provider = RestTokenProvider::new(&settings(base)).unwrap();
    let err = provider.fetch_tokens(20).await.unwrap_err();
    server.await.unwrap();

    match err {
        DashboardError::Api { code, message } => {
            assert_eq!(code, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_failure_reports_http_status() {
    let (base, server) = serve_once("503 Service Unavailable", "upstream down".to_string()).await;

    let provider = RestTokenProvider::new(&settings(base)).unwrap();
    let err = provider.fetch_tokens(20).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, DashboardError::Api { code: 503, .. }), "{:?}", err);
}

#[tokio::test]
async fn currency_is_encoded_into_the_query() {
    let body = json!({ "status": { "error_code": 0 }, "data": [] }).to_string();
    let (base, server) = serve_once("200 OK", body).await;

    let provider = RestTokenProvider::new(&DashboardSettings {
        currency: "EUR&x=1".to_string(),
        ..settings(base)
    })
    .unwrap();
    let tokens = provider.fetch_tokens(5).await.unwrap();
    let request = server.await.unwrap();

    assert!(tokens.is_empty());
    assert!(
        request.starts_with("get /api/v1/tokens?limit=5&convert=eur%26x%3d1 "),
        "{}",
        request.lines().next().unwrap_or_default()
    );
}
