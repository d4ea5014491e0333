use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use hangman_persistence::{connection::connect_and_migrate, repositories::GameRecordRepository};
use hangman_server::{
    config::Config, create_routes, rate_limiter::ClientRateLimits, recording::GameRecorder,
    rooms::RoomManager, sessions::GameService, words::load_catalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = Config::from_env().context("Invalid configuration")?;
    let catalog = Arc::new(load_catalog(&config).context("Failed to load word lists")?);

    let recorder: Option<Arc<dyn GameRecorder>> = match &config.database_url {
        Some(url) => {
            let db = connect_and_migrate(url)
                .await
                .context("Failed to connect to database and run migrations")?;
            let repository: Arc<dyn GameRecorder> = Arc::new(GameRecordRepository::new(db));
            Some(repository)
        }
        None => {
            info!("DATABASE_URL not set; finished games will not be recorded");
            None
        }
    };

    let mut game_service = GameService::new(catalog.clone(), config.clone());
    let mut room_manager = RoomManager::new(catalog, config.clone());
    if let Some(recorder) = recorder {
        game_service = game_service.with_recorder(recorder.clone());
        room_manager = room_manager.with_recorder(recorder);
    }
    let game_service = Arc::new(game_service);
    let room_manager = Arc::new(room_manager);
    let rate_limits = Arc::new(ClientRateLimits::new(
        config.rate_limit_burst,
        config.rate_limit_refill(),
    ));

    let routes = create_routes(game_service.clone(), room_manager.clone(), rate_limits.clone());

    // Start cleanup task
    let session_timeout = config.session_timeout();
    let room_timeout = config.room_timeout();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            let sessions = game_service.purge_idle(session_timeout).await;
            let rooms = room_manager.purge_idle(room_timeout).await;
            rate_limits.purge_full();
            if sessions > 0 || rooms > 0 {
                info!("Cleaned up {} idle sessions and {} idle rooms", sessions, rooms);
            }
        }
    });

    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST '{}'", config.host))?;

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown((ip, config.port), shutdown_signal())?;

    info!("Server started successfully on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("Failed to listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = terminate => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
