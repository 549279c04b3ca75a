use api::middleware::log_request;
use api::routes::routes;
use axum::middleware::from_fn_with_state;
use notifier::Notifier;
use std::{net::SocketAddr, sync::Arc};
use store::AppwriteStore;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::{config, state::AppState};

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    // Set up dependencies
    let store = Arc::new(AppwriteStore::new(
        config::appwrite_endpoint(),
        config::appwrite_project_id(),
        config::appwrite_api_key(),
        config::database_id(),
    ));
    let notifier = Notifier::new(config::discord_webhook_url());
    if !notifier.enabled() {
        tracing::warn!("DISCORD_WEBHOOK_URL not set; notification sink disabled");
    }
    let app_state = AppState::new(store, notifier);

    // Build app router with permissive CORS (handles OPTIONS preflights)
    let app = routes(app_state.clone())
        .layer(from_fn_with_state(app_state, log_request))
        .layer(CorsLayer::permissive());

    // Start server
    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(log_file: &str, _log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
