use std::{net::SocketAddr, sync::Arc};

use coindash::{
    config,
    events::ServerEvent,
    routes,
    services::{market_monitor, notifier::BroadcastBackend, storage::{FileStore, KeyValueStore}},
    AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<ServerEvent>(64);

    let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&settings.data_file));
    let backend = Arc::new(BroadcastBackend::new(
        events_tx.clone(),
        settings.notification_permission,
        kv.clone(),
    ));

    let state = AppState::new(settings.clone(), kv, backend, events_tx);

    let monitor = market_monitor::spawn_market_monitor(state.clone());

    let app = routes::app(state);

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("invalid HOST {:?}: {}", settings.host, e);
            return;
        }
    };
    let addr = SocketAddr::from((ip, settings.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("bind {} failed: {}", addr, e);
            return;
        }
    };
    tracing::info!("listening on http://{}", addr);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutting down");
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!("server error: {}", e);
    }

    monitor.abort();
}
