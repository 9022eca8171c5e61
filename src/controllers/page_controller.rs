use uuid::Uuid;

use crate::dto::page_dto::{PageView, TableView, UiMessage};
use crate::models::{NavigationState, Page};
use crate::repositories::SharedRecordStore;

use super::store_failure;

/// Navegación de la barra lateral y renderizado de la página activa
pub struct PageController {
    store: SharedRecordStore,
}

impl PageController {
    pub fn new(store: SharedRecordStore) -> Self {
        Self { store }
    }

    /// Cambiar de página descarta lo escrito pero conserva el registro cargado
    pub fn navigate(&self, state: &mut NavigationState, page: Page) {
        tracing::debug!("🧭 Navegando a {:?}", page);
        state.go(page);
    }

    /// La tabla se recarga en cada render de la página de edición
    pub async fn render(
        &self,
        session_id: Uuid,
        state: &NavigationState,
        mut messages: Vec<UiMessage>,
    ) -> PageView {
        let mut view = PageView::base(session_id, state);

        if state.page == Page::Edit && state.show_table {
            match self.store.list_all().await {
                Ok(records) => view.table = Some(TableView::from_records(records)),
                Err(e) => messages.push(store_failure("list", &e)),
            }
        }

        view.messages = messages;
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::fixtures::record;
    use crate::controllers::MSG_STORE_FAILURE;
    use crate::repositories::memory_repository::{InMemoryRecordStore, StoreOperation};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_table_only_on_edit_page_when_shown() {
        let store = Arc::new(InMemoryRecordStore::with_records(vec![record("1", "A")]));
        let pages = PageController::new(store.clone());
        let mut state = NavigationState::new();
        state.show_table();

        let view = pages.render(Uuid::new_v4(), &state, vec![]).await;
        assert!(view.table.is_none());
        assert_eq!(store.count(StoreOperation::ListAll), 0);

        pages.navigate(&mut state, Page::Edit);
        let view = pages.render(Uuid::new_v4(), &state, vec![]).await;
        assert_eq!(
            view.table,
            Some(TableView::Rows { records: vec![record("1", "A")] })
        );
    }

    #[tokio::test]
    async fn test_empty_store_renders_info_state() {
        let store = Arc::new(InMemoryRecordStore::new());
        let pages = PageController::new(store);
        let mut state = NavigationState::new();
        state.go(Page::Edit);
        state.show_table();

        let view = pages.render(Uuid::new_v4(), &state, vec![]).await;
        assert!(matches!(view.table, Some(TableView::Empty { .. })));
    }

    #[tokio::test]
    async fn test_list_failure_becomes_message() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.set_unavailable(true);
        let pages = PageController::new(store);
        let mut state = NavigationState::new();
        state.go(Page::Edit);
        state.show_table();

        let view = pages.render(Uuid::new_v4(), &state, vec![]).await;
        assert!(view.table.is_none());
        assert_eq!(view.messages, vec![UiMessage::error(MSG_STORE_FAILURE)]);
    }

    #[tokio::test]
    async fn test_navigation_keeps_selected_record() {
        let store = Arc::new(InMemoryRecordStore::new());
        let pages = PageController::new(store);
        let mut state = NavigationState::new();
        state.go(Page::Edit);
        state.select(Some(record("9", "Z")));

        pages.navigate(&mut state, Page::Add);
        pages.navigate(&mut state, Page::Edit);
        let view = pages.render(Uuid::new_v4(), &state, vec![]).await;
        assert_eq!(view.selected_record, Some(record("9", "Z")));
        assert_eq!(view.fields.len(), 7);
    }
}
