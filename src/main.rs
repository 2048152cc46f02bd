use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use vamu_ai_service::app::{create_app, AppState};
use vamu_ai_service::config::{load_config, save_default_config};
use vamu_ai_service::constants::CONFIG_PATH;
use vamu_ai_service::logging::{init_logging, install_panic_hook};
use vamu_ai_service::VERSION;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--init-config") {
        match save_default_config(&CONFIG_PATH) {
            Ok(_) => {
                println!("Default configuration saved to {:?}", *CONFIG_PATH);
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Failed to save default configuration: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Load configuration
    let config = Arc::new(load_config(&CONFIG_PATH));

    // Initialize logging
    init_logging(&config.logging.level);
    install_panic_hook();

    let state = match AppState::from_config(Arc::clone(&config)) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize upstream clients: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_app(state);

    let host = config
        .server
        .host
        .parse()
        .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0]));
    let addr = SocketAddr::new(host, config.server.port);
    info!("Starting {} v{} on {}", config.app_name, VERSION, addr);
    info!("Environment: {}", config.server.environment);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server failed: {}", e);
    }

    info!("Shutting down {}", config.app_name);
}
