//! Página de edición: búsqueda, tabla, guardar cambios y eliminar
//!
//! El registro cargado se identifica siempre por su clave original, aunque
//! el formulario cambie el BP.

use crate::config::environment::{ConcurrencyPolicy, EditPolicy};
use crate::dto::document_dto::DocumentForm;
use crate::dto::page_dto::UiMessage;
use crate::models::{DocumentRecord, NavigationState};
use crate::repositories::SharedRecordStore;
use crate::utils::validation::validate_new;

use super::{store_failure, violation_warnings};

pub const MSG_NOT_FOUND: &str = "BP não encontrado.";
pub const MSG_EMPTY_SEARCH: &str = "⚠️ Digite o BP do motorista.";
pub const MSG_NOTHING_LOADED: &str = "⚠️ Nenhum registro carregado. Busque um BP primeiro.";
pub const MSG_UPDATED: &str = "✏️ Registro atualizado com sucesso!";
pub const MSG_DELETED: &str = "🗑️ Registro deletado com sucesso!";
pub const MSG_NEW_KEY_TAKEN: &str = "⚠️ Esse BP já pertence a outro registro.";
pub const MSG_STALE_RECORD: &str =
    "⚠️ O registro foi alterado ou removido em outra sessão. Busque novamente.";

pub struct EditController {
    store: SharedRecordStore,
    policy: EditPolicy,
}

impl EditController {
    pub fn new(store: SharedRecordStore, policy: EditPolicy) -> Self {
        Self { store, policy }
    }

    /// Buscar por BP; un fallo de búsqueda descarta el registro cargado
    pub async fn search(&self, state: &mut NavigationState, bp: &str) -> Vec<UiMessage> {
        if bp.trim().is_empty() {
            return vec![UiMessage::warning(MSG_EMPTY_SEARCH)];
        }

        match self.store.find_by_key(bp).await {
            Ok(Some(record)) => {
                tracing::info!("🔍 BP encontrado: '{}'", bp);
                state.select(Some(record));
                Vec::new()
            }
            Ok(None) => {
                tracing::info!("🔍 BP no encontrado: '{}'", bp);
                state.clear_selection();
                vec![UiMessage::error(MSG_NOT_FOUND)]
            }
            Err(e) => vec![store_failure("search", &e)],
        }
    }

    pub fn show_table(&self, state: &mut NavigationState) {
        state.show_table();
    }

    pub fn hide_table(&self, state: &mut NavigationState) {
        state.hide_table();
    }

    /// Reemplazar todos los campos del registro cargado
    pub async fn save(&self, state: &mut NavigationState, form: DocumentForm) -> Vec<UiMessage> {
        let original = match &state.selected_record {
            Some(record) => record.clone(),
            None => return vec![UiMessage::warning(MSG_NOTHING_LOADED)],
        };

        let violations = validate_new(&form);
        if !violations.is_empty() {
            return violation_warnings(&violations);
        }
        let record = match form.into_record() {
            Ok(record) => record,
            Err(violations) => return violation_warnings(&violations),
        };

        if self.policy.check_key_uniqueness && record.bp_motorista != original.bp_motorista {
            match self.store.exists(&record.bp_motorista).await {
                Ok(true) => return vec![UiMessage::error(MSG_NEW_KEY_TAKEN)],
                Ok(false) => {}
                Err(e) => return vec![store_failure("save", &e)],
            }
        }

        if let Some(messages) = self.reject_if_stale(&original, "save").await {
            return messages;
        }

        match self.store.update(&original.bp_motorista, &record).await {
            Ok(()) => {
                tracing::info!(
                    "✏️ Registro actualizado: '{}' -> '{}'",
                    original.bp_motorista,
                    record.bp_motorista
                );
                state.clear_selection();
                vec![UiMessage::success(MSG_UPDATED)]
            }
            Err(e) => vec![store_failure("save", &e)],
        }
    }

    /// Eliminar el registro cargado por su clave original
    pub async fn delete(&self, state: &mut NavigationState) -> Vec<UiMessage> {
        let original = match &state.selected_record {
            Some(record) => record.clone(),
            None => return vec![UiMessage::warning(MSG_NOTHING_LOADED)],
        };

        if let Some(messages) = self.reject_if_stale(&original, "delete").await {
            return messages;
        }

        match self.store.delete(&original.bp_motorista).await {
            Ok(()) => {
                tracing::info!("🗑️ Registro eliminado: '{}'", original.bp_motorista);
                state.clear_selection();
                vec![UiMessage::success(MSG_DELETED)]
            }
            Err(e) => vec![store_failure("delete", &e)],
        }
    }

    /// Con `RejectStale`, la fila actual debe seguir igual a la cargada
    async fn reject_if_stale(&self, original: &DocumentRecord, action: &str) -> Option<Vec<UiMessage>> {
        if self.policy.concurrency != ConcurrencyPolicy::RejectStale {
            return None;
        }

        match self.store.find_by_key(&original.bp_motorista).await {
            Ok(Some(current)) if current == *original => None,
            Ok(_) => {
                tracing::warn!("⚠️ Registro '{}' modificado por otra sesión", original.bp_motorista);
                Some(vec![UiMessage::warning(MSG_STALE_RECORD)])
            }
            Err(e) => Some(vec![store_failure(action, &e)]),
        }
    }
}
