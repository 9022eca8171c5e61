//! Estado de navegación por sesión
//!
//! Sustituye el estado global de la página por un valor explícito que se
//! pasa a cada controlador. No hay guardas de transición: cualquier página
//! puede activarse en cualquier momento.

use serde::{Deserialize, Serialize};

use super::document::DocumentRecord;

/// Páginas disponibles en la barra lateral
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Add,
    Edit,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NavigationState {
    pub page: Page,
    pub show_table: bool,
    /// Registro encontrado en la búsqueda, guardado hasta guardar o eliminar
    pub selected_record: Option<DocumentRecord>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acción de la barra lateral
    pub fn go(&mut self, page: Page) {
        self.page = page;
    }

    pub fn show_table(&mut self) {
        self.show_table = true;
    }

    pub fn hide_table(&mut self) {
        self.show_table = false;
    }

    pub fn select(&mut self, record: Option<DocumentRecord>) {
        self.selected_record = record;
    }

    pub fn clear_selection(&mut self) {
        self.selected_record = None;
    }

    /// Clave original del registro cargado
    pub fn original_key(&self) -> Option<&str> {
        self.selected_record.as_ref().map(|r| r.bp_motorista.as_str())
    }
}
