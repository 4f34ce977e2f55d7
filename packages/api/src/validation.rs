// ABOUTME: Request payload validation for the tarefas API
// ABOUTME: Normalizes loosely-typed JSON bodies into domain inputs before any database work

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use tarefas_core::{OrdemUpdate, TarefaInput};

use crate::response::ApiError;

/// Request body for creating or updating a tarefa.
///
/// Fields are optional and loosely typed so that missing or malformed values
/// produce a 400 with a readable message instead of a deserialization error.
/// `custo` accepts a JSON number or a numeric string ("150.50"), as HTML
/// forms tend to send either.
#[derive(Deserialize)]
pub struct TarefaPayload {
    pub nome: Option<String>,
    pub custo: Option<Value>,
    pub data_limite: Option<String>,
}

/// Request body for the bulk reorder endpoint
#[derive(Deserialize)]
pub struct ReorderPayload {
    pub tarefas: Option<Vec<ReorderEntry>>,
}

#[derive(Deserialize)]
pub struct ReorderEntry {
    pub id: Option<Value>,
    pub ordem: Option<Value>,
}

/// Validate a create/update body and build the storage input.
pub fn validate_tarefa_payload(payload: TarefaPayload) -> Result<TarefaInput, ApiError> {
    let nome = payload
        .nome
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let data_limite_raw = payload
        .data_limite
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let custo_value = payload.custo.filter(|value| match value {
        Value::String(s) => !s.trim().is_empty(),
        Value::Null => false,
        _ => true,
    });

    if nome.is_empty() || data_limite_raw.is_empty() {
        return Err(ApiError::Validation(
            "Todos os campos são obrigatórios.".to_string(),
        ));
    }
    let Some(custo_value) = custo_value else {
        return Err(ApiError::Validation(
            "Todos os campos são obrigatórios.".to_string(),
        ));
    };

    let custo = parse_custo(&custo_value)?;
    let data_limite = parse_data_limite(&data_limite_raw)?;

    Ok(TarefaInput {
        nome,
        custo,
        data_limite,
    })
}

/// Validate a reorder body: non-empty list, integer ids, positive distinct
/// ordem values, distinct ids. All checks run before any database work.
pub fn validate_reorder_payload(payload: ReorderPayload) -> Result<Vec<OrdemUpdate>, ApiError> {
    let entries = match payload.tarefas {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return Err(ApiError::Validation(
                "A lista de tarefas para reordenar é obrigatória.".to_string(),
            ))
        }
    };

    let mut updates = Vec::with_capacity(entries.len());
    for entry in &entries {
        let id = entry.id.as_ref().and_then(Value::as_i64);
        let ordem = entry.ordem.as_ref().and_then(Value::as_i64);

        match (id, ordem) {
            (Some(id), Some(ordem)) if ordem >= 1 => updates.push(OrdemUpdate { id, ordem }),
            _ => {
                return Err(ApiError::Validation(
                    "Cada item precisa de id e ordem inteiros, com ordem a partir de 1."
                        .to_string(),
                ))
            }
        }
    }

    let mut ids: Vec<i64> = updates.iter().map(|u| u.id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != updates.len() {
        return Err(ApiError::Validation(
            "Ids repetidos na lista de reordenação.".to_string(),
        ));
    }

    let mut ordens: Vec<i64> = updates.iter().map(|u| u.ordem).collect();
    ordens.sort_unstable();
    ordens.dedup();
    if ordens.len() != updates.len() {
        return Err(ApiError::Validation(
            "Ordens repetidas na lista de reordenação.".to_string(),
        ));
    }

    Ok(updates)
}

fn parse_custo(value: &Value) -> Result<f64, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(custo) if custo.is_finite() && custo >= 0.0 => Ok(custo),
        _ => Err(ApiError::Validation(
            "Custo deve ser um número maior ou igual a zero.".to_string(),
        )),
    }
}

fn parse_data_limite(raw: &str) -> Result<NaiveDate, ApiError> {
    // Accept a plain date or an RFC 3339 timestamp truncated to its date,
    // the same normalization the original HTML form applied.
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation("Data limite inválida.".to_string()))
}
