//! Product Catalog - an in-memory product catalog HTTP service.
//!
//! This binary parses configuration, seeds the store and starts the HTTP server.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_catalog::{
    config::Config,
    server::{create_router, AppState, RouterConfig},
    ProductStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    run_serve(config).await
}

async fn run_serve(config: Config) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Product Catalog v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Port: {}", config.port);
    info!("  Auth: x-api-key required on every request");
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }
    if let Some(ref url) = config.database_url {
        warn!(
            "  Datastore URI '{}' is ignored; products are kept in memory",
            url
        );
    }

    let store = ProductStore::seeded();
    info!("  Seeded {} products", store.len());

    let router = create_router(AppState::new(store), build_router_config(&config));

    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("");
    info!("Server running on http://{}", addr);
    info!("  GET    /api/products              - list (?category=&name=&page=&limit=)");
    info!("  POST   /api/products              - create");
    info!("  GET    /api/products/{{id}}         - fetch");
    info!("  PUT    /api/products/{{id}}         - update");
    info!("  DELETE /api/products/{{id}}         - delete");
    info!("  GET    /api/products/stats/data   - products per category");
    info!("");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Filter used when `RUST_LOG` is unset.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "product_catalog=debug"
    } else {
        "product_catalog=info"
    }
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config =
        RouterConfig::new(config.api_key_or_empty()).with_request_logging(!config.no_request_log);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
