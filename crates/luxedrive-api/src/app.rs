//! Application builder: wires router, middleware, state, and the delivery
//! pool into a running server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use luxedrive_core::config::AppConfig;
use luxedrive_core::error::AppError;
use luxedrive_database::DatabasePool;
use luxedrive_worker::handlers::{MailHandler, MessagingHandler};
use luxedrive_worker::transport::{SendGridMailTransport, TwilioMessageTransport};
use luxedrive_worker::{DeliveryExecutor, DeliveryPool};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::{AppState, Stores};

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Register a handler per channel. Transports without credentials are
/// still registered and fail each delivery permanently.
pub fn build_executor(config: &AppConfig) -> Result<DeliveryExecutor, AppError> {
    let notifications = &config.notifications;
    let mut executor =
        DeliveryExecutor::new(Duration::from_secs(notifications.transport_timeout_seconds));

    let mail = SendGridMailTransport::from_config(notifications)?;
    if !mail.is_configured() {
        tracing::warn!("Mail API key not configured, booking emails will not be sent");
    }
    executor.register(Arc::new(MailHandler::new(Arc::new(mail))));

    let messaging = TwilioMessageTransport::from_config(notifications)?;
    if notifications.admin_phone.is_some() && !messaging.is_configured() {
        tracing::warn!("Messaging credentials not configured, booking texts will not be sent");
    }
    executor.register(Arc::new(MessagingHandler::new(Arc::new(messaging))));

    Ok(executor)
}

/// Runs the LuxeDrive server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting LuxeDrive server...");

    // ── Step 1: Initialize repositories ──────────────────────────
    let stores = Stores::postgres(&db);

    // ── Step 2: Shutdown channel & delivery pool ─────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (pool, pool_handle) = if config.worker.enabled {
        let executor = Arc::new(build_executor(&config)?);
        let (pool, handle) = DeliveryPool::start(executor, &config.worker, shutdown_rx);
        (pool, Some(handle))
    } else {
        tracing::info!("Delivery pool disabled, email and messaging are skipped");
        (DeliveryPool::disabled(), None)
    };

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(config, stores, Arc::new(pool), Some(db.clone()));
    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LuxeDrive server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Drain deliveries and close the pool ──────────────
    if let Some(handle) = pool_handle {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Delivery pool task failed");
        }
    }
    db.close().await;

    tracing::info!("LuxeDrive server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
