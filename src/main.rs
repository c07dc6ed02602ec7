use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_registry::config::environment::EnvironmentConfig;
use fleet_registry::routes::create_app_router;
use fleet_registry::services::vehicle_query::VehicleFilter;
use fleet_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.effective_log_level())
        .init();

    info!("🚚 Fleet Registry - Vehicle API");
    info!("==============================");
    info!("📄 Fleet store: {}", config.db_path.display());

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(config);

    // Comprobar el store antes de aceptar peticiones; crea el fichero si no existe
    match app_state.vehicles.list(&VehicleFilter::default()).await {
        Ok(vehicles) => info!("✅ Fleet loaded with {} vehicles", vehicles.len()),
        Err(e) => {
            error!("❌ Error loading fleet store: {}", e);
            return Err(anyhow::anyhow!("Error loading fleet store: {}", e));
        }
    }

    let app = create_app_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /api/health - Health check");
    info!("   GET    /api/vehicles - Listar vehículos (?q, ?status, ?sort=campo:dir)");
    info!("   POST   /api/vehicles - Crear vehículo");
    info!("   GET    /api/vehicles/:id - Obtener vehículo");
    info!("   PUT    /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
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
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
