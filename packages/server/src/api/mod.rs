use axum::{routing::get, Router};

use tarefas_api::create_tarefas_router;
use tarefas_core::DbState;

pub mod health;

/// Assemble the full application router on top of a database state
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/", get(health::greeting))
        .nest("/tarefas", create_tarefas_router())
        .with_state(db)
}
