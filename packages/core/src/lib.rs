// ABOUTME: Core domain types and SQLite storage for the tarefas service
// ABOUTME: Shared by the HTTP API, the server binary and the TUI client

pub mod db;
pub mod storage;
pub mod types;

pub use db::DbState;
pub use storage::{StorageError, StorageResult, TarefaStorage};
pub use types::{OrdemUpdate, Tarefa, TarefaInput};
