use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use gestao_documentos::config::database::{mask_database_url, DatabaseConfig};
use gestao_documentos::config::environment::{EnvironmentConfig, StoreBackend};
use gestao_documentos::repositories::{
    InMemoryRecordStore, PgRecordStore, SharedRecordStore, SupabaseRecordStore,
};
use gestao_documentos::routes::create_app_router;
use gestao_documentos::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging; RUST_LOG tiene prioridad
    let default_level = if config.is_development() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("📚 Gestão de Documentos");
    info!("========================");

    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error inicializando el almacén de registros: {}", e);
            return Err(e);
        }
    };

    let app = create_app_router(AppState::new(config.clone(), store));

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/sessions - Crear sesión");
    info!("   GET  /api/sessions/:id - Página actual");
    info!("   POST /api/sessions/:id/navigate - Cambiar de página");
    info!("   POST /api/sessions/:id/add - Cadastrar documento");
    info!("   POST /api/sessions/:id/edit/search - Buscar por BP");
    info!("   POST /api/sessions/:id/edit/table/show|hide - Tabla completa");
    info!("   POST /api/sessions/:id/edit/save - Salvar alterações");
    info!("   POST /api/sessions/:id/edit/delete - Excluir registro");
    info!("   GET  /api/documents - Listar todos los documentos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Crear el cliente de la tabla según STORE_BACKEND
async fn build_store(config: &EnvironmentConfig) -> Result<SharedRecordStore> {
    let store: SharedRecordStore = match config.store_backend {
        StoreBackend::Rest => {
            let url = config.supabase_url.as_deref().unwrap_or_default();
            let key = config.supabase_key.as_deref().unwrap_or_default();
            info!("🔌 Almacén REST: {}", url);
            Arc::new(SupabaseRecordStore::new(url, key, config.request_timeout)?)
        }
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().unwrap_or_default();
            info!("🔌 Almacén Postgres: {}", mask_database_url(url));
            let pool = DatabaseConfig::new(url, config.request_timeout)
                .create_pool()
                .await?;
            Arc::new(PgRecordStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("🧪 Almacén en memoria (los datos se pierden al reiniciar)");
            Arc::new(InMemoryRecordStore::new())
        }
    };
    Ok(store)
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
