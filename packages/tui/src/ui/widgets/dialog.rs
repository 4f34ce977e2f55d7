use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Outcome of a key fed to the confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult {
    Confirmed,
    Cancelled,
    /// Still waiting for a decision
    Pending,
}

/// Which button currently has focus
#[derive(Debug, Clone, PartialEq)]
pub enum DialogFocus {
    Cancel,
    Confirm,
}

/// State of a two-button confirmation prompt
#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Dangerous actions get red styling and an extra warning line
    pub dangerous: bool,
    pub focus: DialogFocus,
}

impl ConfirmationDialog {
    /// Create a dialog with focus starting on the cancel button.
    pub fn new(title: String, message: String) -> Self {
        Self {
            title,
            message,
            confirm_text: "Confirmar".to_string(),
            cancel_text: "Cancelar".to_string(),
            dangerous: false,
            focus: DialogFocus::Cancel,
        }
    }

    pub fn dangerous(mut self) -> Self {
        self.dangerous = true;
        self
    }

    pub fn with_buttons(mut self, confirm_text: String, cancel_text: String) -> Self {
        self.confirm_text = confirm_text;
        self.cancel_text = cancel_text;
        self
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            DialogFocus::Cancel => DialogFocus::Confirm,
            DialogFocus::Confirm => DialogFocus::Cancel,
        };
    }

    /// Handle key input and return the resulting decision, if any.
    pub fn handle_key(&mut self, key: KeyCode) -> DialogResult {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.next_focus();
                DialogResult::Pending
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                DialogFocus::Cancel => DialogResult::Cancelled,
                DialogFocus::Confirm => DialogResult::Confirmed,
            },
            KeyCode::Char('s') | KeyCode::Char('S') => DialogResult::Confirmed,
            KeyCode::Char('n') | KeyCode::Char('N') => DialogResult::Cancelled,
            KeyCode::Esc => DialogResult::Cancelled,
            _ => DialogResult::Pending,
        }
    }
}

/// Renders a [`ConfirmationDialog`] as a centered overlay
pub struct ConfirmationDialogWidget<'a> {
    dialog: &'a ConfirmationDialog,
}

impl<'a> ConfirmationDialogWidget<'a> {
    pub fn new(dialog: &'a ConfirmationDialog) -> Self {
        Self { dialog }
    }
}

impl<'a> Widget for ConfirmationDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_width = (area.width / 3).max(44).min(area.width.saturating_sub(4));
        let dialog_height = 9u16.min(area.height.saturating_sub(2));

        let dialog_area = Rect {
            x: (area.width.saturating_sub(dialog_width)) / 2,
            y: (area.height.saturating_sub(dialog_height)) / 2,
            width: dialog_width,
            height: dialog_height,
        };

        Clear.render(dialog_area, buf);

        let accent = if self.dialog.dangerous {
            Color::Red
        } else {
            Color::Yellow
        };

        let block = Block::default()
            .title(self.dialog.title.clone())
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Message content
                Constraint::Length(3), // Button area
            ])
            .split(inner);

        let mut content = vec![Line::raw(self.dialog.message.clone()), Line::raw("")];
        if self.dialog.dangerous {
            content.push(Line::from(Span::styled(
                "Esta ação não pode ser desfeita!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(Text::from(content))
            .style(Style::default().fg(Color::White))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .render(chunks[0], buf);

        self.render_buttons(chunks[1], buf);
    }
}

impl<'a> ConfirmationDialogWidget<'a> {
    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        let cancel_width = self.dialog.cancel_text.chars().count() as u16 + 2;
        let confirm_width = self.dialog.confirm_text.chars().count() as u16 + 2;
        let spacing = 3;

        let total_width = cancel_width + confirm_width + spacing;
        let start_x = (area.width.saturating_sub(total_width)) / 2;

        let cancel_style = if self.dialog.focus == DialogFocus::Cancel {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let confirm_color = if self.dialog.dangerous {
            Color::Red
        } else {
            Color::Green
        };
        let confirm_style = if self.dialog.focus == DialogFocus::Confirm {
            Style::default()
                .bg(confirm_color)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(confirm_color)
        };

        let cancel_area = Rect {
            x: area.x + start_x,
            y: area.y + 1,
            width: cancel_width,
            height: 1,
        };
        Paragraph::new(format!("[{}]", self.dialog.cancel_text))
            .style(cancel_style)
            .render(cancel_area, buf);

        let confirm_area = Rect {
            x: area.x + start_x + cancel_width + spacing,
            y: area.y + 1,
            width: confirm_width,
            height: 1,
        };
        Paragraph::new(format!("[{}]", self.dialog.confirm_text))
            .style(confirm_style)
            .render(confirm_area, buf);

        let shortcuts_area = Rect {
            x: area.x,
            y: area.y + 2,
            width: area.width,
            height: 1,
        };
        Paragraph::new("Tab: Alternar • Enter: Confirmar • Esc: Cancelar")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(shortcuts_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog() -> ConfirmationDialog {
        ConfirmationDialog::new("Excluir Tarefa".to_string(), "Excluir?".to_string())
            .with_buttons("Sim".to_string(), "Não".to_string())
            .dangerous()
    }

    #[test]
    fn test_focus_starts_on_cancel() {
        let mut d = dialog();
        assert_eq!(d.focus, DialogFocus::Cancel);
        assert_eq!(d.handle_key(KeyCode::Enter), DialogResult::Cancelled);
    }

    #[test]
    fn test_tab_switches_focus_then_enter_confirms() {
        let mut d = dialog();
        assert_eq!(d.handle_key(KeyCode::Tab), DialogResult::Pending);
        assert_eq!(d.focus, DialogFocus::Confirm);
        assert_eq!(d.handle_key(KeyCode::Enter), DialogResult::Confirmed);
    }

    #[test]
    fn test_arrows_switch_focus() {
        let mut d = dialog();
        d.handle_key(KeyCode::Right);
        assert_eq!(d.focus, DialogFocus::Confirm);
        d.handle_key(KeyCode::Left);
        assert_eq!(d.focus, DialogFocus::Cancel);
    }

    #[test]
    fn test_esc_cancels_regardless_of_focus() {
        let mut d = dialog();
        d.next_focus();
        assert_eq!(d.handle_key(KeyCode::Esc), DialogResult::Cancelled);
    }

    #[test]
    fn test_letter_shortcuts() {
        let mut d = dialog();
        assert_eq!(d.handle_key(KeyCode::Char('s')), DialogResult::Confirmed);
        assert_eq!(d.handle_key(KeyCode::Char('n')), DialogResult::Cancelled);
    }

    #[test]
    fn test_other_keys_are_pending() {
        let mut d = dialog();
        assert_eq!(d.handle_key(KeyCode::Char('x')), DialogResult::Pending);
        assert_eq!(d.handle_key(KeyCode::Up), DialogResult::Pending);
    }
}
