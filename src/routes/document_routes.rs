use axum::{extract::State, routing::get, Json, Router};

use crate::models::DocumentRecord;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_document_router() -> Router<AppState> {
    Router::new().route("/", get(list_documents))
}

/// Todas las filas de la tabla, para exportar
async fn list_documents(State(app): State<AppState>) -> AppResult<Json<Vec<DocumentRecord>>> {
    let records = app.store.list_all().await?;
    Ok(Json(records))
}
