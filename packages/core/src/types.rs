// ABOUTME: Tarefa type definitions
// ABOUTME: Structures shared by the storage layer, the HTTP API and the TUI client

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task record. Field names match the wire format of the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tarefa {
    pub id: i64,
    pub nome: String,
    pub custo: f64,
    pub data_limite: NaiveDate,
    pub ordem: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating a tarefa. Create and update share the same
/// full-field contract: all three fields are required by both operations and
/// `ordem` is never client-assigned here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TarefaInput {
    pub nome: String,
    pub custo: f64,
    pub data_limite: NaiveDate,
}

/// One entry of a bulk reorder: the tarefa to move and its new ordem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdemUpdate {
    pub id: i64,
    pub ordem: i64,
}
