//! Modelos del sistema
//!
//! Este módulo contiene el registro de documentos que mapea a la tabla
//! remota y el estado de navegación de cada sesión.

pub mod document;
pub mod navigation;

pub use document::{DocumentRecord, DocumentStatus};
pub use navigation::{NavigationState, Page};
