use crate::state::{AppState, Mode};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Single-line context bar: mode badge, position, shortcuts
pub struct StatusBarWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn mode_info(&self) -> (&'static str, Style) {
        match self.state.mode() {
            Mode::List => ("LISTA", Style::default().fg(Color::Cyan)),
            Mode::Carry => (
                "MOVENDO",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Mode::Form => (
                "FORMULÁRIO",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Mode::Confirm => (
                "CONFIRMAR",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        }
    }

    fn breadcrumb(&self) -> String {
        if self.state.carrying {
            if let Some(tarefa) = self.state.selected_tarefa() {
                return format!(" Movendo \"{}\"", tarefa.nome);
            }
        }
        match self.state.selected {
            Some(i) => format!(" Tarefas ({}/{})", i + 1, self.state.tarefas.len()),
            None => format!(" Tarefas ({})", self.state.tarefas.len()),
        }
    }

    fn shortcuts(&self) -> &'static str {
        match self.state.mode() {
            Mode::Confirm => "Tab: Alternar • Enter: Confirmar • Esc: Cancelar",
            Mode::Form => "Tab: Próximo campo • Enter: Salvar • Esc: Cancelar",
            Mode::Carry => "↑↓: Mover • Espaço/Enter: Soltar • Esc: Cancelar",
            Mode::List => {
                if self.state.tarefas.is_empty() {
                    "n: Nova • r: Atualizar • q: Sair"
                } else {
                    "↑↓: Navegar • n: Nova • e: Editar • d: Excluir • Shift+↑↓: Trocar • Espaço: Arrastar • r: Atualizar • q: Sair"
                }
            }
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode_text, mode_style) = self.mode_info();
        let shortcuts = self.shortcuts();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(mode_text.chars().count() as u16 + 2),
                Constraint::Min(10),
                Constraint::Length(shortcuts.chars().count() as u16),
            ])
            .split(area);

        Paragraph::new(format!(" {} ", mode_text))
            .style(mode_style)
            .render(chunks[0], buf);

        Paragraph::new(self.breadcrumb())
            .style(Style::default().fg(Color::Gray))
            .render(chunks[1], buf);

        Paragraph::new(shortcuts)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[2], buf);
    }
}
