//! Cliente de la tabla de documentos
//!
//! `RecordStore` es la única frontera con la base de datos remota. Cada
//! operación es una llamada, sin reintentos ni transacción.

pub mod memory_repository;
pub mod postgres_repository;
pub mod supabase_repository;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::DocumentRecord;

pub use memory_repository::InMemoryRecordStore;
pub use postgres_repository::PgRecordStore;
pub use supabase_repository::SupabaseRecordStore;

/// Fallo de transporte o rechazo remoto en cualquier operación
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote store rejected the request ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("malformed row: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Todas las filas; tabla vacía devuelve lista vacía
    async fn list_all(&self) -> Result<Vec<DocumentRecord>, StoreError>;

    async fn exists(&self, bp: &str) -> Result<bool, StoreError>;

    /// Primera fila con esa clave
    async fn find_by_key(&self, bp: &str) -> Result<Option<DocumentRecord>, StoreError>;

    /// No comprueba unicidad: el llamador ya consultó `exists`
    async fn insert(&self, record: &DocumentRecord) -> Result<(), StoreError>;

    /// Reemplaza todos los campos de la fila `old_key`, clave incluida
    async fn update(&self, old_key: &str, record: &DocumentRecord) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

pub type SharedRecordStore = Arc<dyn RecordStore>;
