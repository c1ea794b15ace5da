use std::sync::Arc;

use api_client::InMemoryProvider;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use core_types::{Crossing, Series, Timeframe};
use tower::ServiceExt;
use web_server::types::{GroupSummary, ScanResponse};
use web_server::{AppState, create_router};

const SETTINGS: &str = r#"
    [app]
    environment = "test"
    log_level = "debug"

    [provider]
    base_url = "http://localhost:1"

    [server]
    host = "127.0.0.1"
    port = 0

    [[universes]]
    name = "Thai"
    instruments = ["A.BK", { symbol = "B.BK", name = "Bravo" }]

    [[groups]]
    kind = "universe"
    name = "Thai"
    universe = "Thai"
    enabled = true

    [[groups]]
    kind = "pairs"
    name = "Ratios"
    pairs = [["A.BK", "B.BK"]]
"#;

fn daily(closes: &[f64]) -> Series {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Series::from_closes(start, Duration::days(1), closes)
}

fn crossing_up() -> Series {
    let mut closes = vec![10.0; 30];
    closes.extend((1..=8).map(|i| 10.0 - 0.01 * i as f64));
    closes.extend([20.0, 20.0]);
    daily(&closes)
}

fn router() -> axum::Router {
    let settings = app_config::settings_from_str(SETTINGS).unwrap();
    let provider = InMemoryProvider::new()
        .with_series("A.BK", crossing_up())
        .with_series("B.BK", daily(&[10.0; 40]));
    create_router(AppState {
        settings: Arc::new(settings),
        provider: Arc::new(provider),
    })
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn index_serves_the_dashboard() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("/api/scan"));
    // Groups enabled in the configuration start out selected.
    assert!(page.contains("input.checked = g.enabled"));
}

#[tokio::test]
async fn lists_configured_groups() {
    let (status, body) = get("/api/groups").await;
    assert_eq!(status, StatusCode::OK);

    let groups: Vec<GroupSummary> = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        groups,
        vec![
            GroupSummary {
                name: "Thai".into(),
                kind: "universe".into(),
                size: 2,
                enabled: true,
            },
            GroupSummary {
                name: "Ratios".into(),
                kind: "pairs".into(),
                size: 1,
                enabled: false,
            },
        ]
    );
}

#[tokio::test]
async fn scan_returns_rows_in_group_order_with_custom_last() {
    let (status, body) =
        get("/api/scan?groups=Ratios,Thai,Missing&custom=c.bk&timeframe=weekly").await;
    assert_eq!(status, StatusCode::OK);

    let response: ScanResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.timeframe, Timeframe::Weekly);

    let rows: Vec<_> = response
        .rows
        .iter()
        .map(|r| (r.group.as_str(), r.symbol.as_str(), r.crossing))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Thai", "A.BK", Crossing::CrossUp),
            ("Thai", "Bravo", Crossing::None),
            ("Ratios", "A.BK/B.BK", Crossing::CrossUp),
            ("Custom", "C.BK", Crossing::None),
        ]
    );
    assert_eq!(response.rows[0].status, "CrossUp");
}

#[tokio::test]
async fn extended_window_labels_both_periods() {
    let (status, body) = get("/api/scan?groups=Thai&window=extended").await;
    assert_eq!(status, StatusCode::OK);

    let response: ScanResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.timeframe, Timeframe::Daily);
    assert_eq!(response.rows[0].status, "CrossUp (1 period ago)");
    assert_eq!(response.rows[0].crossing, Crossing::CrossUp);
}

#[tokio::test]
async fn empty_selection_yields_no_rows() {
    let (status, body) = get("/api/scan").await;
    assert_eq!(status, StatusCode::OK);

    let response: ScanResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.rows.is_empty());
}
