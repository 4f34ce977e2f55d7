use chrono::NaiveDate;
use crossterm::event::Event;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::ui::format::format_data;
use tarefas_core::{Tarefa, TarefaInput};

const FIELD_COUNT: usize = 3;

/// Which record the form writes on submit
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// State of the create/edit form: three line-input fields plus focus,
/// an inline error line and the in-flight flag.
#[derive(Debug, Clone)]
pub struct TarefaForm {
    pub mode: FormMode,
    pub nome: Input,
    pub custo: Input,
    pub data_limite: Input,
    /// Index of the focused field, 0..FIELD_COUNT
    pub focus: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

impl TarefaForm {
    /// Empty form for a new tarefa.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            nome: Input::default(),
            custo: Input::default(),
            data_limite: Input::default(),
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    /// Form prefilled with an existing tarefa's fields.
    pub fn edit(tarefa: &Tarefa) -> Self {
        Self {
            mode: FormMode::Edit(tarefa.id),
            nome: Input::new(tarefa.nome.clone()),
            custo: Input::new(format_custo_input(tarefa.custo)),
            data_limite: Input::new(format_data(tarefa.data_limite)),
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Nova Tarefa",
            FormMode::Edit(_) => "Editar Tarefa",
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
    }

    pub fn previous_field(&mut self) {
        self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// Route an input event to the focused field.
    pub fn handle_event(&mut self, event: &Event) {
        let field = match self.focus {
            0 => &mut self.nome,
            1 => &mut self.custo,
            _ => &mut self.data_limite,
        };
        field.handle_event(event);
    }

    /// Validate the fields, producing the payload sent to the server.
    ///
    /// Custo accepts a comma or a dot as decimal separator; the date
    /// accepts "dd/mm/aaaa" or "aaaa-mm-dd".
    pub fn validate(&self) -> Result<TarefaInput, String> {
        let nome = self.nome.value().trim();
        let custo_raw = self.custo.value().trim();
        let data_raw = self.data_limite.value().trim();

        if nome.is_empty() || custo_raw.is_empty() || data_raw.is_empty() {
            return Err("Todos os campos são obrigatórios.".to_string());
        }

        let custo = match custo_raw.replace(',', ".").parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => return Err("Custo deve ser um número maior ou igual a zero.".to_string()),
        };

        let data_limite =
            parse_data(data_raw).ok_or_else(|| "Data limite inválida.".to_string())?;

        Ok(TarefaInput {
            nome: nome.to_string(),
            custo,
            data_limite,
        })
    }

    /// Put the form back into its editable state with a message.
    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.submitting = false;
    }

    /// Draw the form as a centered overlay.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = (area.width * 2 / 3).max(46).min(area.width.saturating_sub(4));
        let height = 19u16.min(area.height.saturating_sub(2));

        let form_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(self.title())
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Nome label
                Constraint::Length(3), // Nome input
                Constraint::Length(1),
                Constraint::Length(1), // Custo label
                Constraint::Length(3), // Custo input
                Constraint::Length(1),
                Constraint::Length(1), // Data label
                Constraint::Length(3), // Data input
                Constraint::Length(1),
                Constraint::Length(1), // Error line
                Constraint::Length(1), // Shortcuts line
            ])
            .split(inner);

        self.render_field(frame, chunks[0], chunks[1], "Nome", &self.nome, self.focus == 0);
        self.render_field(frame, chunks[3], chunks[4], "Custo (R$)", &self.custo, self.focus == 1);
        self.render_field(
            frame,
            chunks[6],
            chunks[7],
            "Data Limite (dd/mm/aaaa)",
            &self.data_limite,
            self.focus == 2,
        );

        if let Some(error) = &self.error {
            let error_line = Paragraph::new(format!("❌ {}", error))
                .style(Style::default().fg(Color::Red));
            frame.render_widget(error_line, chunks[9]);
        }

        let hint = if self.submitting {
            "Salvando..."
        } else {
            "Tab: Próximo campo • Enter: Salvar • Esc: Cancelar"
        };
        let hint_line = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint_line, chunks[10]);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        label_area: Rect,
        input_area: Rect,
        label: &str,
        input: &Input,
        is_current: bool,
    ) {
        let label_style = if is_current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(Paragraph::new(label).style(label_style), label_area);

        // Scroll long values so the cursor stays visible inside the border
        let width = input_area.width.max(3).saturating_sub(2) as usize;
        let scroll = input.visual_scroll(width);

        let input_paragraph = Paragraph::new(input.value())
            .style(Style::default().fg(Color::White))
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if is_current {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::Gray)
                    }),
            );
        frame.render_widget(input_paragraph, input_area);

        if is_current {
            let cursor_x = input.visual_cursor().max(scroll) - scroll;
            frame.set_cursor_position((input_area.x + 1 + cursor_x as u16, input_area.y + 1));
        }
    }
}

/// Decimal rendering for the custo field when editing, comma-separated.
fn format_custo_input(custo: f64) -> String {
    if custo.fract() == 0.0 {
        format!("{}", custo as i64)
    } else {
        format!("{}", custo).replace('.', ",")
    }
}

fn parse_data(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn filled(nome: &str, custo: &str, data: &str) -> TarefaForm {
        let mut form = TarefaForm::create();
        form.nome = Input::new(nome.to_string());
        form.custo = Input::new(custo.to_string());
        form.data_limite = Input::new(data.to_string());
        form
    }

    fn tarefa() -> Tarefa {
        Tarefa {
            id: 7,
            nome: "Comprar telhas".to_string(),
            custo: 450.75,
            data_limite: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            ordem: 2,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_fields() {
        let form = filled("Pintura", "1250.50", "2025-08-01");
        let input = form.validate().unwrap();
        assert_eq!(input.nome, "Pintura");
        assert_eq!(input.custo, 1250.50);
        assert_eq!(input.data_limite, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    }

    #[test]
    fn test_validate_accepts_comma_decimal_and_brazilian_date() {
        let form = filled("Pintura", "1250,50", "01/08/2025");
        let input = form.validate().unwrap();
        assert_eq!(input.custo, 1250.50);
        assert_eq!(input.data_limite, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
    }

    #[test]
    fn test_validate_accepts_zero_custo() {
        let form = filled("Pintura", "0", "2025-08-01");
        assert_eq!(form.validate().unwrap().custo, 0.0);
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let form = filled("  Pintura  ", " 10 ", " 2025-08-01 ");
        assert_eq!(form.validate().unwrap().nome, "Pintura");
    }

    #[test]
    fn test_validate_requires_all_fields() {
        let cases = [
            filled("", "", ""),
            filled("Pintura", "", "2025-08-01"),
            filled("Pintura", "10", ""),
            filled("", "10", "2025-08-01"),
            filled("   ", "10", "2025-08-01"),
        ];
        for form in cases {
            assert_eq!(
                form.validate().unwrap_err(),
                "Todos os campos são obrigatórios."
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_custo() {
        for custo in ["abc", "-1", "-0,01", "1.2.3", "NaN"] {
            let form = filled("Pintura", custo, "2025-08-01");
            assert_eq!(
                form.validate().unwrap_err(),
                "Custo deve ser um número maior ou igual a zero.",
                "custo: {custo}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        for data in ["amanhã", "2025-13-01", "31/02/2025", "08/01"] {
            let form = filled("Pintura", "10", data);
            assert_eq!(form.validate().unwrap_err(), "Data limite inválida.", "data: {data}");
        }
    }

    #[test]
    fn test_edit_prefills_fields() {
        let form = TarefaForm::edit(&tarefa());
        assert_eq!(form.mode, FormMode::Edit(7));
        assert_eq!(form.nome.value(), "Comprar telhas");
        assert_eq!(form.custo.value(), "450,75");
        assert_eq!(form.data_limite.value(), "30/06/2025");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_edit_prefills_whole_custo_without_decimals() {
        let mut t = tarefa();
        t.custo = 300.0;
        let form = TarefaForm::edit(&t);
        assert_eq!(form.custo.value(), "300");
    }

    #[test]
    fn test_field_focus_wraps_both_ways() {
        let mut form = TarefaForm::create();
        assert_eq!(form.focus, 0);
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, 2);
        form.next_field();
        assert_eq!(form.focus, 0);
        form.previous_field();
        assert_eq!(form.focus, 2);
    }

    #[test]
    fn test_fail_restores_editable_state() {
        let mut form = filled("Pintura", "10", "2025-08-01");
        form.submitting = true;
        form.fail("Já existe uma tarefa com esse nome.".to_string());
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("Já existe uma tarefa com esse nome."));
    }
}
