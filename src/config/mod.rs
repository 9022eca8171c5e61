//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de entorno y del pool de base de
//! datos.

pub mod database;
pub mod environment;

pub use environment::*;
