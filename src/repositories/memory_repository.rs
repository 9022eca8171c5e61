//! Tabla en memoria
//!
//! Misma semántica que la tabla remota: actualizar o borrar una clave
//! inexistente no afecta filas y no es un error. Guarda un registro de
//! operaciones y puede simular una caída del servicio.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError};
use crate::models::DocumentRecord;

/// Operaciones del cliente, para inspeccionar qué llamadas se hicieron
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    ListAll,
    Exists,
    FindByKey,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    rows: RwLock<Vec<DocumentRecord>>,
    calls: Mutex<Vec<StoreOperation>>,
    unavailable: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<DocumentRecord>) -> Self {
        Self {
            rows: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Todas las llamadas siguientes fallan con 503 mientras esté activo
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<StoreOperation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, operation: StoreOperation) -> usize {
        self.calls().into_iter().filter(|op| *op == operation).count()
    }

    pub async fn snapshot(&self) -> Vec<DocumentRecord> {
        self.rows.read().await.clone()
    }

    fn record_call(&self, operation: StoreOperation) -> Result<(), StoreError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(operation);
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Remote {
                status: 503,
                body: "record store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_all(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        self.record_call(StoreOperation::ListAll)?;
        Ok(self.rows.read().await.clone())
    }

    async fn exists(&self, bp: &str) -> Result<bool, StoreError> {
        self.record_call(StoreOperation::Exists)?;
        Ok(self.rows.read().await.iter().any(|r| r.bp_motorista == bp))
    }

    async fn find_by_key(&self, bp: &str) -> Result<Option<DocumentRecord>, StoreError> {
        self.record_call(StoreOperation::FindByKey)?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|r| r.bp_motorista == bp)
            .cloned())
    }

    async fn insert(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        self.record_call(StoreOperation::Insert)?;
        self.rows.write().await.push(record.clone());
        Ok(())
    }

    async fn update(&self, old_key: &str, record: &DocumentRecord) -> Result<(), StoreError> {
        self.record_call(StoreOperation::Update)?;
        for row in self.rows.write().await.iter_mut() {
            if row.bp_motorista == old_key {
                *row = record.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.record_call(StoreOperation::Delete)?;
        self.rows.write().await.retain(|r| r.bp_motorista != key);
        Ok(())
    }
}
