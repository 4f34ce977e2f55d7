use crate::state::AppState;
use crate::ui::format::{format_brl, format_data};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Rows with a custo at or above this value get the warning highlight.
const DESTAQUE_CUSTO: f64 = 1000.0;

const NOME_WIDTH: usize = 28;

/// Render the tarefas screen: the list plus the totals footer.
pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_list(frame, state, chunks[0]);
    render_footer(frame, state, chunks[1]);
}

fn render_list(frame: &mut Frame, state: &AppState, area: Rect) {
    if state.loading {
        let block = Block::default().title("Tarefas").borders(Borders::ALL);
        let paragraph = Paragraph::new("Carregando tarefas...")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(paragraph, area);
        return;
    }

    if state.tarefas.is_empty() {
        if let Some(error) = &state.error {
            let block = Block::default()
                .title("Tarefas")
                .title_style(Style::default().fg(Color::Red))
                .borders(Borders::ALL);
            let paragraph = Paragraph::new(error.as_str())
                .block(block)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(paragraph, area);
        } else {
            let block = Block::default()
                .title("Tarefas - Nenhuma tarefa")
                .title_style(Style::default().fg(Color::Yellow))
                .borders(Borders::ALL);
            let help_text = "Nenhuma tarefa cadastrada.\n\nAtalhos:\n• 'n' - Nova tarefa\n• 'r' - Atualizar\n• 'q' - Sair";
            let paragraph = Paragraph::new(help_text)
                .block(block)
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(paragraph, area);
        }
        return;
    }

    let title = format!("Tarefas ({})", state.tarefas.len());
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL);

    let items: Vec<ListItem> = state
        .tarefas
        .iter()
        .map(|tarefa| {
            let destaque = tarefa.custo >= DESTAQUE_CUSTO;

            let (ordem_style, nome_style, custo_style, data_style, row_style) = if destaque {
                let base = Style::default().bg(Color::Yellow).fg(Color::Black);
                (
                    base,
                    base.add_modifier(Modifier::BOLD),
                    base.add_modifier(Modifier::BOLD),
                    base,
                    base,
                )
            } else {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Green),
                    Style::default().fg(Color::Gray),
                    Style::default(),
                )
            };

            let line = Line::from(vec![
                Span::styled(format!("{:>3}  ", tarefa.ordem), ordem_style),
                Span::styled(
                    format!("{:<width$}", truncate(&tarefa.nome, NOME_WIDTH), width = NOME_WIDTH),
                    nome_style,
                ),
                Span::styled(format!("{:>16}", format_brl(tarefa.custo)), custo_style),
                Span::styled(format!("  {}", format_data(tarefa.data_limite)), data_style),
            ]);

            ListItem::new(line).style(row_style)
        })
        .collect();

    let highlight_style = if state.carrying {
        Style::default()
            .bg(Color::Magenta)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol(">> ");

    let mut list_state = ListState::default();
    list_state.select(state.selected);

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total = Line::from(vec![
        Span::styled("Somatório dos Custos: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_brl(state.total_custo()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    ]);

    match &state.error {
        Some(error) if !state.tarefas.is_empty() => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(42), Constraint::Min(10)])
                .split(inner);
            frame.render_widget(Paragraph::new(total), chunks[0]);
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Right),
                chunks[1],
            );
        }
        _ => frame.render_widget(Paragraph::new(total), inner),
    }
}

fn truncate(nome: &str, max: usize) -> String {
    if nome.chars().count() <= max {
        nome.to_string()
    } else {
        let cut: String = nome.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
