//! Gestão de Documentos
//!
//! Servicio para añadir, buscar, editar y eliminar documentos de
//! motoristas guardados en la tabla remota `Gestao_documentos`.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
