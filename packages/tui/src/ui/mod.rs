pub mod format;
pub mod tarefas;
pub mod widgets;

use crate::state::AppState;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use widgets::{ConfirmationDialogWidget, StatusBarWidget};

/// Top-level render: the tarefas screen, the status bar, then overlays.
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    tarefas::render(frame, state, chunks[0]);
    frame.render_widget(StatusBarWidget::new(state), chunks[1]);

    if let Some(form) = &state.form {
        form.render(frame, chunks[0]);
    }

    // The dialog always paints last so it sits above everything else
    if let Some(dialog) = &state.dialog {
        frame.render_widget(ConfirmationDialogWidget::new(dialog), frame.area());
    }
}
