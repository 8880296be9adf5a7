use anyhow::Context;
use dotenv::dotenv;
use loyalty_maturity::{
    app::create_router, app_state::AppState, config, db, quiz::Catalog, telemetry,
    telemetry::TelemetryConfig,
};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    telemetry::init_subscriber()?;

    let config = config::init()?;

    let telemetry_handles =
        telemetry::init_telemetry(TelemetryConfig::for_app(&config.app)).await?;

    let catalog = match &config.quiz.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load quiz catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    info!(
        items = catalog.len(),
        categories = catalog.categories().len(),
        "Quiz catalog loaded"
    );

    let store = db::init_store(config.database.as_ref())
        .await
        .context("Failed to initialize assessment store")?;

    let state = AppState::new(config.clone(), catalog, store);
    let app = create_router(state);

    let addr = config.server_addr();
    info!("{} Listening on {}", config.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to serve application")?;

    telemetry_handles.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install TERM handler: {}", e);
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

    info!("Shutdown signal received");
}
