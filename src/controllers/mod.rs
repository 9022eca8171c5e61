//! Controladores de página
//!
//! Cada acción recibe el `NavigationState` de la sesión de forma explícita
//! y devuelve los mensajes a mostrar. Los errores del almacén se capturan
//! aquí y nunca terminan la sesión.

pub mod add_controller;
pub mod edit_controller;
pub mod page_controller;

pub use add_controller::AddController;
pub use edit_controller::EditController;
pub use page_controller::PageController;

use crate::dto::page_dto::UiMessage;
use crate::repositories::StoreError;
use crate::utils::validation::Violation;

pub const MSG_FILL_ALL_FIELDS: &str = "⚠️ Preencha todos os campos antes de salvar.";
pub const MSG_DUPLICATE_KEY: &str = "⚠️ Esse BP já existe! Vá na aba EDITAR para alterá-lo";
pub const MSG_STORE_FAILURE: &str =
    "❌ Não foi possível acessar o banco de dados. Tente novamente.";

/// Error del almacén mostrado como mensaje genérico
pub(crate) fn store_failure(action: &str, error: &StoreError) -> UiMessage {
    tracing::error!("❌ Falló la acción '{}': {}", action, error);
    UiMessage::error(MSG_STORE_FAILURE)
}

/// Avisos de validación: un aviso único si falta algún campo
pub(crate) fn violation_warnings(violations: &[Violation]) -> Vec<UiMessage> {
    if violations.iter().any(Violation::is_missing) {
        return vec![UiMessage::warning(MSG_FILL_ALL_FIELDS)];
    }
    violations
        .iter()
        .map(|v| UiMessage::warning(v.message()))
        .collect()
}
