use crate::api::ApiClient;
use crate::events::{AppEvent, EventHandler};
use crate::state::{AppState, Mode};
use crate::ui;
use crate::ui::widgets::{DialogResult, FormMode};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tarefas_core::OrdemUpdate;
use tracing::warn;

/// Shown when the list cannot be fetched at all.
const ERRO_CARREGAR: &str = "Falha ao carregar as tarefas. O backend está rodando?";

/// Main TUI application struct
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    client: ApiClient,
    ctrl_c_armed: bool,
}

impl App {
    pub fn new(server_url: String) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            client: ApiClient::new(server_url),
            ctrl_c_armed: false,
        }
    }

    /// Fetch the canonical list from the server.
    pub async fn refresh(&mut self) {
        match self.client.list_tarefas().await {
            Ok(tarefas) => self.state.set_tarefas(tarefas),
            Err(e) => {
                warn!("Failed to load tarefas: {}", e);
                self.state.set_load_error(ERRO_CARREGAR.to_string());
            }
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        let mut event_handler = EventHandler::new(250); // 250ms tick rate

        // Paint the loading screen before the first fetch so a slow or
        // absent backend does not leave a blank terminal
        terminal.draw(|frame| ui::render(frame, &self.state))?;
        self.refresh().await;

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            if let Some(event) = event_handler.next().await {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key).await,
                    AppEvent::Tick => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key_event(&mut self, key: KeyEvent) {
        // Two Ctrl+C presses in a row always quit, whatever the mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.ctrl_c_armed {
                self.quit();
            }
            self.ctrl_c_armed = true;
            return;
        }
        self.ctrl_c_armed = false;

        match self.state.mode() {
            Mode::Confirm => self.handle_dialog_key(key.code).await,
            Mode::Form => self.handle_form_key(key).await,
            Mode::Carry => self.handle_carry_key(key.code).await,
            Mode::List => self.handle_list_key(key).await,
        }
    }

    async fn handle_dialog_key(&mut self, key: KeyCode) {
        let result = match self.state.dialog.as_mut() {
            Some(dialog) => dialog.handle_key(key),
            None => return,
        };
        match result {
            DialogResult::Confirmed => {
                if let Some(id) = self.state.resolve_delete(true) {
                    self.delete(id).await;
                }
            }
            DialogResult::Cancelled => {
                self.state.resolve_delete(false);
            }
            DialogResult::Pending => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.close_form(),
            KeyCode::Enter => self.submit_form().await,
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.state.form.as_mut() {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.state.form.as_mut() {
                    form.previous_field();
                }
            }
            _ => {
                if let Some(form) = self.state.form.as_mut() {
                    form.handle_event(&Event::Key(key));
                }
            }
        }
    }

    async fn handle_carry_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                self.state.carry_up();
            }
            KeyCode::Down => {
                self.state.carry_down();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(updates) = self.state.drop_carry() {
                    self.apply_reorder(updates).await;
                }
            }
            KeyCode::Esc => {
                self.state.cancel_carry();
            }
            _ => {}
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('r') => self.refresh().await,
            KeyCode::Char('n') => self.state.open_create_form(),
            KeyCode::Char('e') => {
                self.state.open_edit_form();
            }
            KeyCode::Char('d') => {
                self.state.request_delete();
            }
            KeyCode::Char(' ') => {
                self.state.start_carry();
            }
            KeyCode::Up if shift => {
                if let Some(updates) = self.state.move_selected_up() {
                    self.apply_reorder(updates).await;
                }
            }
            KeyCode::Down if shift => {
                if let Some(updates) = self.state.move_selected_down() {
                    self.apply_reorder(updates).await;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next();
            }
            KeyCode::Esc => self.state.clear_error(),
            _ => {}
        }
    }

    /// Validate and submit the form, closing it on success.
    async fn submit_form(&mut self) {
        let (mode, input) = {
            let Some(form) = self.state.form.as_mut() else {
                return;
            };
            match form.validate() {
                Ok(input) => {
                    form.submitting = true;
                    form.error = None;
                    (form.mode.clone(), input)
                }
                Err(message) => {
                    form.fail(message);
                    return;
                }
            }
        };

        let result = match mode {
            FormMode::Create => self.client.create_tarefa(&input).await.map(|_| ()),
            FormMode::Edit(id) => self.client.update_tarefa(id, &input).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.state.close_form();
                self.refresh().await;
            }
            Err(e) => {
                warn!("Failed to save tarefa: {}", e);
                if let Some(form) = self.state.form.as_mut() {
                    form.fail(e.to_string());
                }
            }
        }
    }

    /// Delete on the server, then refetch; a failure message survives
    /// the refetch.
    async fn delete(&mut self, id: i64) {
        let result = self.client.delete_tarefa(id).await;
        self.refresh().await;
        if let Err(e) = result {
            warn!("Failed to delete tarefa {}: {}", id, e);
            self.state.set_error(e.to_string());
        }
    }

    /// Push a reorder to the server. On failure the canonical list is
    /// refetched so the screen never stays diverged from the backend.
    async fn apply_reorder(&mut self, updates: Vec<OrdemUpdate>) {
        if let Err(e) = self.client.reorder_tarefas(&updates).await {
            warn!("Failed to reorder tarefas: {}", e);
            self.refresh().await;
            self.state.set_error(e.to_string());
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
