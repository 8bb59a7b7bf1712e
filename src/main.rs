use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use holiday_cache::{
    AppError, AppState, Config, DataPortalClient, FileStore, HolidayCacheManager, MetricsRegistry,
    Result, SystemClock, create_router, start_refresh_loop,
};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Загружаем .env файл
    dotenvy::dotenv().ok();

    // Инициализация логирования
    setup_tracing();

    let config = Config::from_env();
    config.validate().map_err(AppError::Config)?;

    tracing::info!("Holiday cache file: {}", config.holidays_path().display());
    tracing::info!("Holiday API: {}", config.remote.base_url);

    // Создаём реестр метрик и менеджер кэша
    let metrics = MetricsRegistry::new();
    let source = DataPortalClient::new(config.remote.clone())?;
    let manager = Arc::new(HolidayCacheManager::new(
        Arc::new(FileStore::new(config.holidays_path())),
        Arc::new(source),
        Arc::new(SystemClock),
        metrics.clone(),
    ));

    // Создаём состояние приложения
    let state = Arc::new(AppState {
        config: config.clone(),
        manager: manager.clone(),
        metrics,
    });

    // Канал завершения (graceful shutdown)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Ожидание Ctrl+C
    tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    // Начальное заполнение и ежедневная проверка смены года в фоне
    let refresh_handle = start_refresh_loop(
        shutdown_rx.clone(),
        manager,
        Duration::from_secs(config.refresh_interval_secs),
    );

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr.parse().map_err(|e| {
        tracing::error!("Invalid server address: {}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("Holiday cache starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /holidays/{{year}}?force=<bool> - Holiday lookup");
    tracing::info!("  - GET /health                       - Health check");
    tracing::info!("  - GET /metrics                      - Prometheus metrics");

    // Запуск сервера с graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown({
            let mut shutdown_rx = shutdown_rx.clone();
            async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
                tracing::info!("HTTP server shutting down");
            }
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = refresh_handle.await {
        tracing::warn!("Holiday refresh loop ended abnormally: {}", e);
    }

    Ok(())
}

fn setup_tracing() {
    // Используем EnvFilter::from_default_env() для правильной обработки RUST_LOG
    // Если RUST_LOG не установлена, используем "info" по умолчанию
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
