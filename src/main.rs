//! SEO Guardian Backend - relay for AI-assisted website audits
//!
//! This service accepts audit requests from the web frontend, forwards a
//! prompt to the Lyzr inference API, and relays the generated markdown
//! report back to the caller.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use seo_guardian::{
    api, config::LogFormat, middleware, services::LyzrClient, AppConfig, AppState, ServiceMetrics,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        println!("SEO Guardian Backend {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration first (before logging, so we know log format)
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_logging(&config);

    info!("SEO Guardian Backend starting up");

    // Initialize the Lyzr client; a missing key degrades health but is not
    // a startup failure
    let lyzr = LyzrClient::from_config(&config.lyzr)
        .context("Failed to initialize Lyzr client")?
        .map(Arc::new);

    let state = AppState {
        config: config.clone(),
        lyzr,
        metrics: Arc::new(ServiceMetrics::new()),
    };

    let app = create_router(state, &config)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address configuration")?;

    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server is ready to accept connections");

    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}

/// Initialize the logging/tracing infrastructure
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            subscriber
                .with(fmt::layer().json().with_target(true))
                .init();
        }
        LogFormat::Compact => {
            subscriber
                .with(fmt::layer().compact().with_target(false))
                .init();
        }
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .init();
        }
    }
}

/// Create the application router with all routes and middleware
fn create_router(state: AppState, config: &AppConfig) -> Result<Router> {
    // Configure CORS - only needed when the frontend is served separately
    // (development); same-origin requests are unaffected
    let cors = if config.cors.allowed_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origin: HeaderValue = config
            .cors
            .allowed_origin
            .parse()
            .with_context(|| format!("Invalid CORS origin: {}", config.cors.allowed_origin))?;
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Configure tracing for HTTP requests
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // API routes count requests; static asset hits stay out of the counter
    let api_router = api::routes()
        .layer(axum::middleware::from_fn_with_state(
            state.metrics.clone(),
            middleware::track_requests,
        ))
        .with_state(state);

    // Optionally serve the frontend static files. Router routes win, so
    // `GET /` keeps the JSON status contract and the SPA is reached through
    // the fallback (index.html).
    let router = if config.server.serve_frontend {
        if let Some(ref static_dir) = config.server.static_dir {
            if static_dir.exists() {
                info!("Serving frontend from {:?}", static_dir);

                let index_file = static_dir.join("index.html");
                if index_file.exists() {
                    let serve_dir =
                        ServeDir::new(static_dir).not_found_service(ServeFile::new(&index_file));
                    api_router.fallback_service(serve_dir)
                } else {
                    warn!(
                        "index.html not found in {:?}, SPA fallback disabled",
                        static_dir
                    );
                    api_router.fallback_service(ServeDir::new(static_dir))
                }
            } else {
                warn!(
                    "Static directory {:?} does not exist, frontend not served",
                    static_dir
                );
                api_router
            }
        } else {
            info!("No static directory configured, frontend not served");
            api_router
        }
    } else {
        info!("Frontend serving disabled by configuration");
        api_router
    };

    Ok(router.layer(trace_layer).layer(cors))
}

/// Print help message
fn print_help() {
    println!(
        r#"SEO Guardian Backend {}

USAGE:
    seo-guardian [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information

ENVIRONMENT:
    SEO_GUARDIAN_CONFIG Path to configuration file (default: config.yaml)
    PORT                Listening port (default: 4000)
    CORS_ORIGIN         Allowed CORS origin (default: *)
    LYZR_API_KEY        Lyzr API key; without it every audit call fails
    LYZR_API_URL        Override the Lyzr inference endpoint

CONFIGURATION:
    The application looks for configuration files in the following order:
    1. Path specified by SEO_GUARDIAN_CONFIG environment variable
    2. ./config.yaml
    3. /etc/seo-guardian/config.yaml

    Environment variables override values from the file. A `.env` file in
    the working directory is loaded automatically."#,
        env!("CARGO_PKG_VERSION")
    );
}
