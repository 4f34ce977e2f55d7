// ABOUTME: HTTP API layer for the tarefas service providing REST endpoints and routing
// ABOUTME: Integration layer between axum and the storage package

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use tarefas_core::DbState;

pub mod response;
pub mod tarefas_handlers;
pub mod validation;

pub use response::ApiError;

/// Creates the tarefas API router (nested under /tarefas)
pub fn create_tarefas_router() -> Router<DbState> {
    Router::new()
        .route("/", get(tarefas_handlers::list_tarefas))
        .route("/", post(tarefas_handlers::create_tarefa))
        .route("/reordenar", patch(tarefas_handlers::reorder_tarefas))
        .route("/{id}", put(tarefas_handlers::update_tarefa))
        .route("/{id}", delete(tarefas_handlers::delete_tarefa))
}
