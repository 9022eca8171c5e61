use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::{AddController, EditController, PageController};
use crate::dto::document_dto::{DocumentForm, NavigateRequest, SearchRequest};
use crate::dto::page_dto::{PageView, UiMessage};
use crate::models::{NavigationState, Page};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session))
        .route("/:id/navigate", post(navigate))
        .route("/:id/add", post(submit_add))
        .route("/:id/edit/search", post(search))
        .route("/:id/edit/table/show", post(show_table))
        .route("/:id/edit/table/hide", post(hide_table))
        .route("/:id/edit/save", post(save_changes))
        .route("/:id/edit/delete", post(delete_record))
}

/// Los botones sólo existen en su página
fn require_page(state: &NavigationState, page: Page, action: &str) -> AppResult<()> {
    if state.page != page {
        return Err(AppError::BadRequest(format!(
            "Action '{}' is not available on page '{:?}'",
            action, state.page
        )));
    }
    Ok(())
}

async fn render(
    app: &AppState,
    id: Uuid,
    state: &NavigationState,
    messages: Vec<UiMessage>,
) -> Json<PageView> {
    Json(PageController::new(app.store.clone()).render(id, state, messages).await)
}

async fn create_session(State(app): State<AppState>) -> Json<PageView> {
    let (id, session) = app.sessions.create().await;
    let state = session.lock().await;
    render(&app, id, &state, Vec::new()).await
}

async fn get_session(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let state = session.lock().await;
    Ok(render(&app, id, &state, Vec::new()).await)
}

async fn navigate(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    PageController::new(app.store.clone()).navigate(&mut state, request.page);
    Ok(render(&app, id, &state, Vec::new()).await)
}

async fn submit_add(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<DocumentForm>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    require_page(&state, Page::Add, "add")?;

    let messages = AddController::new(app.store.clone())
        .submit(&mut state, form)
        .await;
    Ok(render(&app, id, &state, messages).await)
}

fn edit_controller(app: &AppState) -> EditController {
    EditController::new(app.store.clone(), app.config.edit_policy)
}

async fn search(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    require_page(&state, Page::Edit, "search")?;

    let messages = edit_controller(&app)
        .search(&mut state, &request.bp_motorista)
        .await;
    Ok(render(&app, id, &state, messages).await)
}

async fn show_table(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    require_page(&state, Page::Edit, "table/show")?;

    edit_controller(&app).show_table(&mut state);
    Ok(render(&app, id, &state, Vec::new()).await)
}

async fn hide_table(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    require_page(&state, Page::Edit, "table/hide")?;

    edit_controller(&app).hide_table(&mut state);
    Ok(render(&app, id, &state, Vec::new()).await)
}

async fn save_changes(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<DocumentForm>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    require_page(&state, Page::Edit, "save")?;

    let messages = edit_controller(&app).save(&mut state, form).await;
    Ok(render(&app, id, &state, messages).await)
}

async fn delete_record(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PageView>> {
    let session = app.session(id).await?;
    let mut state = session.lock().await;
    require_page(&state, Page::Edit, "delete")?;

    let messages = edit_controller(&app).delete(&mut state).await;
    Ok(render(&app, id, &state, messages).await)
}
