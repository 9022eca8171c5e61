use crate::dto::document_dto::DocumentForm;
use crate::dto::page_dto::UiMessage;
use crate::models::NavigationState;
use crate::repositories::SharedRecordStore;
use crate::utils::validation::validate_new;

use super::{store_failure, violation_warnings, MSG_DUPLICATE_KEY};

pub const MSG_ADDED: &str = "✅ Registro adicionado com sucesso!";

pub struct AddController {
    store: SharedRecordStore,
}

impl AddController {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    /// Guardar un registro nuevo.
    ///
    /// Validación local primero; la consulta de unicidad sólo se hace con
    /// datos válidos y `insert` sólo si la clave no existe.
    pub async fn submit(&self, _state: &mut NavigationState, form: DocumentForm) -> Vec<UiMessage> {
        let violations = validate_new(&form);
        if !violations.is_empty() {
            tracing::debug!("⚠️ Formulario inválido: {:?}", violations);
            return violation_warnings(&violations);
        }

        match self.store.exists(&form.bp_motorista).await {
            Ok(true) => {
                tracing::info!("⚠️ BP duplicado: '{}'", form.bp_motorista);
                return vec![UiMessage::error(MSG_DUPLICATE_KEY)];
            }
            Ok(false) => {}
            Err(e) => return vec![store_failure("add", &e)],
        }

        let record = match form.into_record() {
            Ok(record) => record,
            Err(violations) => return violation_warnings(&violations),
        };

        match self.store.insert(&record).await {
            Ok(()) => {
                tracing::info!("✅ Registro añadido: '{}'", record.bp_motorista);
                vec![UiMessage::success(MSG_ADDED)]
            }
            Err(e) => vec![store_failure("add", &e)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::fixtures::{joao_form, record};
    use crate::controllers::{MSG_FILL_ALL_FIELDS, MSG_STORE_FAILURE};
    use crate::dto::page_dto::MessageLevel;
    use crate::repositories::memory_repository::{InMemoryRecordStore, StoreOperation};
    use std::sync::Arc;

    fn controller(store: &Arc<InMemoryRecordStore>) -> AddController {
        AddController::new(store.clone())
    }

    #[tokio::test]
    async fn test_add_valid_record() {
        let store = Arc::new(InMemoryRecordStore::new());
        let mut state = NavigationState::new();

        let messages = controller(&store).submit(&mut state, joao_form()).await;

        assert_eq!(messages, vec![UiMessage::success(MSG_ADDED)]);
        let rows = store.snapshot().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], joao_form().into_record().unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_key_never_inserts() {
        let store = Arc::new(InMemoryRecordStore::with_records(vec![record("55", "Outro")]));
        let mut state = NavigationState::new();

        let messages = controller(&store).submit(&mut state, joao_form()).await;

        assert_eq!(messages, vec![UiMessage::error(MSG_DUPLICATE_KEY)]);
        assert_eq!(store.count(StoreOperation::Insert), 0);
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_store_call() {
        let store = Arc::new(InMemoryRecordStore::new());
        let mut state = NavigationState::new();

        let mut form = joao_form();
        form.placa.clear();
        let messages = controller(&store).submit(&mut state, form).await;
        assert_eq!(messages, vec![UiMessage::warning(MSG_FILL_ALL_FIELDS)]);

        let mut form = joao_form();
        form.numero_agregado = "12A3".to_string();
        let messages = controller(&store).submit(&mut state, form).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert!(messages[0].text.contains("apenas números"));

        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_unavailable(true);
        let mut state = NavigationState::new();

        let messages = controller(&store).submit(&mut state, joao_form()).await;

        assert_eq!(messages, vec![UiMessage::error(MSG_STORE_FAILURE)]);
        assert_eq!(store.count(StoreOperation::Insert), 0);
    }
}
