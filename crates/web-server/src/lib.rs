// In crates/web-server/src/lib.rs

use std::sync::Arc;

use api_client::PriceHistoryProvider;
use app_config::{Settings, parse_custom_symbols};
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
};
use core_types::ScanGroup;
use engine::Scanner;
use tokio::net::TcpListener;
use types::{GroupSummary, ResultRow, ScanParams, ScanResponse};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

const INDEX_HTML: &str = include_str!("index.html");

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub provider: Arc<dyn PriceHistoryProvider>,
}

/// Creates the main application router with all routes and middleware.
///
/// # Arguments
///
/// * `app_state`: The shared `AppState` holding settings and the price provider.
///
/// # Returns
///
/// The configured `axum::Router`.
pub fn create_router(app_state: AppState) -> Router {
    // Any origin is allowed; the dashboard is meant for local use.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any);

    Router::new()
        .route("/", get(index))
        .route("/api/groups", get(list_groups))
        .route("/api/scan", get(run_scan))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Binds to the configured address and serves the dashboard until shutdown.
pub async fn run(settings: Settings, provider: Arc<dyn PriceHistoryProvider>) -> Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind { addr: addr.clone(), source })?;

    tracing::info!(%addr, "Dashboard listening.");

    let app_state = AppState {
        settings: Arc::new(settings),
        provider,
    };
    axum::serve(listener, create_router(app_state))
        .await
        .map_err(Error::Serve)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<GroupSummary>>> {
    let groups = state.settings.scan_groups()?;
    let summaries = groups
        .iter()
        .zip(&state.settings.groups)
        .map(|(group, config)| GroupSummary {
            name: group.name.clone(),
            kind: group.target.kind().to_string(),
            size: group.target.len(),
            enabled: config.enabled(),
        })
        .collect();
    Ok(Json(summaries))
}

async fn run_scan(
    State(state): State<AppState>,
    Query(params): Query<ScanParams>,
) -> Result<Json<ScanResponse>> {
    let settings = &state.settings;
    let timeframe = params.timeframe.unwrap_or(settings.scanner.timeframe);
    let window = params.window.unwrap_or(settings.scanner.window);

    let names: Vec<String> = params
        .groups
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let mut groups = settings.select_groups(&names)?;
    let custom = parse_custom_symbols(params.custom.as_deref().unwrap_or_default());
    if !custom.is_empty() {
        groups.push(ScanGroup::custom(custom));
    }

    let scanner = Scanner::from_settings(
        settings,
        settings.macd_settings().with_window(window),
        state.provider.clone(),
    )
    .map_err(|e| Error::Scanner(e.to_string()))?;

    let reports = scanner.scan_all(&groups, timeframe).await;
    let rows = reports
        .into_iter()
        .flat_map(|report| {
            let group = report.group;
            report.records.into_iter().map(move |record| ResultRow {
                group: group.clone(),
                symbol: record.label,
                status: record.classification.to_string(),
                crossing: record.classification.headline(),
            })
        })
        .collect();

    Ok(Json(ScanResponse { timeframe, rows }))
}
