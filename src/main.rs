use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use coexpression_graph::search::backend::HttpCoexpressionBackend;
use coexpression_graph::search::handlers::{handle_graph, handle_search};
use coexpression_graph::search::orchestrator::SearchOrchestrator;
use coexpression_graph::search::protocol::{ENDPOINT_GRAPH, ENDPOINT_SEARCH};
use coexpression_graph::search::types::{SearchEvent, SearchSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 5 {
        eprintln!(
            "Usage: {} --bind <addr:port> --backend <url> [--max-edges <n>] [--timeout-ms <ms>] [--min-stringency <n>]",
            args[0]
        );
        eprintln!(
            "Example: {} --bind 127.0.0.1:8080 --backend http://127.0.0.1:9000",
            args[0]
        );

        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut backend_url: Option<String> = None;
    let mut settings = SearchSettings::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--bind", Some(v)) => bind_addr = Some(v.parse()?),
            ("--backend", Some(v)) => backend_url = Some(v.clone()),
            ("--max-edges", Some(v)) => settings.server_max_edges = v.parse()?,
            ("--timeout-ms", Some(v)) => settings.phase_timeout = Duration::from_millis(v.parse()?),
            ("--min-stringency", Some(v)) => settings.min_stringency = v.parse()?,
            (flag, _) => {
                tracing::warn!("Ignoring argument {}", flag);
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    let bind_addr = bind_addr.ok_or_else(|| anyhow::anyhow!("--bind is required"))?;
    let backend_url = backend_url.ok_or_else(|| anyhow::anyhow!("--backend is required"))?;

    tracing::info!("Coexpression backend: {}", backend_url);
    tracing::info!(
        "Server edge cap {}, phase timeout {} ms, minimum stringency {}",
        settings.server_max_edges,
        settings.phase_timeout.as_millis(),
        settings.min_stringency
    );

    // 1. Remote backend + orchestrator:
    let backend = Arc::new(HttpCoexpressionBackend::new(&backend_url));
    let orchestrator = SearchOrchestrator::new(backend, settings);

    // 2. Event logger:
    let mut events = orchestrator.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SearchEvent::Completed(results)) => {
                    for entry in results.tiers.menu_entries() {
                        tracing::info!(
                            "  - search #{} {}: {}",
                            results.sequence,
                            entry.size,
                            entry.label
                        );
                    }
                }
                Ok(SearchEvent::Failed { sequence, message }) => {
                    tracing::warn!("  - search #{} failed: {}", sequence, message);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event logger skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // 3. HTTP Router:
    let app = Router::new()
        .route(ENDPOINT_SEARCH, post(handle_search))
        .route(ENDPOINT_GRAPH, get(handle_graph))
        .layer(Extension(orchestrator));

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
