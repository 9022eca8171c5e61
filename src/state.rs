//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: configuración, cliente de la tabla y las
//! sesiones de navegación.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::NavigationState;
use crate::repositories::SharedRecordStore;
use crate::utils::errors::{not_found_error, AppResult};

/// Sesión de un usuario; el mutex serializa sus acciones
#[derive(Debug)]
struct Session {
    state: Arc<Mutex<NavigationState>>,
    last_seen: Instant,
}

impl Session {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() > ttl
    }
}

/// Estados de navegación por sesión
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Crear una sesión nueva, limpiando antes las expiradas
    pub async fn create(&self) -> (Uuid, Arc<Mutex<NavigationState>>) {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.ttl));
        if sessions.len() < before {
            tracing::debug!("🧹 {} sesiones expiradas eliminadas", before - sessions.len());
        }

        let id = Uuid::new_v4();
        let state = Arc::new(Mutex::new(NavigationState::new()));
        sessions.insert(
            id,
            Session {
                state: state.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::info!("🆕 Sesión creada: {} (activas: {})", id, sessions.len());
        (id, state)
    }

    /// Obtener una sesión activa y renovar su expiración
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<NavigationState>>> {
        let mut sessions = self.sessions.write().await;
        let expired = sessions.get(&id)?.is_expired(self.ttl);
        if expired {
            sessions.remove(&id);
            tracing::debug!("⌛ Sesión expirada: {}", id);
            return None;
        }

        let session = sessions.get_mut(&id)?;
        session.last_seen = Instant::now();
        Some(session.state.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: SharedRecordStore,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: SharedRecordStore) -> Self {
        let sessions = SessionStore::new(config.session_ttl);
        Self {
            config,
            store,
            sessions,
        }
    }

    /// Sesión activa o 404
    pub async fn session(&self, id: Uuid) -> AppResult<Arc<Mutex<NavigationState>>> {
        self.sessions
            .get(id)
            .await
            .ok_or_else(|| not_found_error("Session", &id.to_string()))
    }
}
