//! Utilidades del sistema
//!
//! Errores HTTP y validación de formularios.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult};
pub use validation::{validate_new, FormField, Violation};
