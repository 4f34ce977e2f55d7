// ABOUTME: HTTP request handlers for tarefa operations
// ABOUTME: CRUD plus bulk reorder, backed by the shared database state

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use tracing::{debug, info};

use tarefas_core::{DbState, Tarefa};

use crate::response::ApiError;
use crate::validation::{
    validate_reorder_payload, validate_tarefa_payload, ReorderPayload, TarefaPayload,
};

fn require_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection);
            Err(ApiError::Validation(
                "Corpo da requisição inválido.".to_string(),
            ))
        }
    }
}

/// List all tarefas ordered by `ordem`
pub async fn list_tarefas(State(db): State<DbState>) -> Result<Json<Vec<Tarefa>>, ApiError> {
    info!("Listing tarefas");

    let tarefas = db.tarefa_storage.list_tarefas().await?;
    Ok(Json(tarefas))
}

/// Create a new tarefa at the end of the order
pub async fn create_tarefa(
    State(db): State<DbState>,
    payload: Result<Json<TarefaPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Tarefa>), ApiError> {
    let input = validate_tarefa_payload(require_json(payload)?)?;

    info!("Creating tarefa '{}'", input.nome);

    let tarefa = db.tarefa_storage.create_tarefa(input).await?;
    Ok((StatusCode::CREATED, Json(tarefa)))
}

/// Update an existing tarefa's nome, custo and data_limite
pub async fn update_tarefa(
    State(db): State<DbState>,
    Path(id): Path<i64>,
    payload: Result<Json<TarefaPayload>, JsonRejection>,
) -> Result<Json<Tarefa>, ApiError> {
    let input = validate_tarefa_payload(require_json(payload)?)?;

    info!("Updating tarefa: {}", id);

    let tarefa = db.tarefa_storage.update_tarefa(id, input).await?;
    Ok(Json(tarefa))
}

/// Delete a tarefa
pub async fn delete_tarefa(
    State(db): State<DbState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting tarefa: {}", id);

    db.tarefa_storage.delete_tarefa(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a bulk reorder atomically
pub async fn reorder_tarefas(
    State(db): State<DbState>,
    payload: Result<Json<ReorderPayload>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updates = validate_reorder_payload(require_json(payload)?)?;

    info!("Reordering {} tarefas", updates.len());

    db.tarefa_storage.reorder_tarefas(&updates).await?;
    Ok(Json(json!({
        "message": "Ordem das tarefas atualizada com sucesso."
    })))
}
