//! Tarefas TUI - terminal frontend for the tarefas service
//!
//! Renders the task list with ratatui and talks to the HTTP backend over
//! reqwest: create, edit, delete and reorder tarefas without leaving the
//! terminal.

pub mod api;
pub mod app;
pub mod events;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::AppState;
