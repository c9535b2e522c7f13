use campusdesk::router::init_router;
use campusdesk::state::{init_app_state, seed_admin_from_env};
use campusdesk_config::ServerConfig;
use campusdesk_observability::{init_metrics, init_tracing, metrics_app};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server = ServerConfig::from_env();
    let state = init_app_state(&server).await?;
    seed_admin_from_env(&state).await.map_err(|e| e.error)?;

    if let Some(handle) = init_metrics() {
        let metrics_listener = tokio::net::TcpListener::bind(&server.metrics_addr).await?;
        tracing::info!(addr = %server.metrics_addr, "Metrics endpoint listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                tracing::error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);
    let listener = tokio::net::TcpListener::bind(&server.addr).await?;
    tracing::info!(
        addr = %server.addr,
        environment = ?server.environment,
        "Server running; docs at /swagger-ui and /scalar"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
