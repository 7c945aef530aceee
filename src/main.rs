use std::sync::Arc;

use formrelay::client::Relay;
use formrelay::config::load_config;
use formrelay::persistence::{Persistence, SledStore};
use formrelay::transport::{AppState, StoreServer, start_http_server};
use formrelay::utils::logging;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        logging::init("info");
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init(&config.log.level);

    let store = SledStore::open(&config.store.path)?;
    let persistence = Persistence::new(Arc::new(store), config.store.collection.clone());

    let relay = Relay::from_settings(&config.udp).await?;
    let store_server = StoreServer::bind(&config.udp.addr(), persistence, &config.udp).await?;
    let listener = TcpListener::bind(config.http.addr()).await?;
    let state = AppState::new(config.http.clone(), relay);

    info!(
        "Store server listening on udp://{}",
        store_server.local_addr()?
    );
    let store_server = tokio::spawn(store_server.run());
    let web_front = tokio::spawn(start_http_server(listener, state));

    tokio::select! {
        res = store_server => {
            Err(format!("store server exited unexpectedly: {res:?}").into())
        }
        res = web_front => {
            Err(format!("web front exited unexpectedly: {res:?}").into())
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received. Exiting gracefully.");
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
