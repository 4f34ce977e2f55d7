use crate::ui::widgets::{ConfirmationDialog, TarefaForm};
use tarefas_core::{OrdemUpdate, Tarefa};

/// Interaction mode, derived from which overlays are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Carry,
    Form,
    Confirm,
}

/// Mutable state behind the tarefas screen.
///
/// Every read the renderer does and every optimistic write the key handlers
/// do goes through here, so the whole controller is testable without a
/// terminal. The list is kept sorted by `ordem` except while a carry is in
/// progress, when the on-screen arrangement is the source of truth.
pub struct AppState {
    pub tarefas: Vec<Tarefa>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<usize>,
    pub form: Option<TarefaForm>,
    pub dialog: Option<ConfirmationDialog>,
    pub pending_delete: Option<i64>,
    pub carrying: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tarefas: Vec::new(),
            loading: true,
            error: None,
            selected: None,
            form: None,
            dialog: None,
            pending_delete: None,
            carrying: false,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.dialog.is_some() {
            Mode::Confirm
        } else if self.form.is_some() {
            Mode::Form
        } else if self.carrying {
            Mode::Carry
        } else {
            Mode::List
        }
    }

    /// Replace the list with the server's canonical ordering.
    ///
    /// Clears the loading flag, any page-level error and any carry in
    /// progress; the selection is clamped to the new bounds.
    pub fn set_tarefas(&mut self, mut tarefas: Vec<Tarefa>) {
        tarefas.sort_by_key(|t| t.ordem);
        self.tarefas = tarefas;
        self.loading = false;
        self.error = None;
        self.carrying = false;
        self.clamp_selection();
    }

    /// Record a failed list fetch.
    pub fn set_load_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn clamp_selection(&mut self) {
        self.selected = if self.tarefas.is_empty() {
            None
        } else {
            match self.selected {
                None => Some(0),
                Some(i) => Some(i.min(self.tarefas.len() - 1)),
            }
        };
    }

    pub fn selected_tarefa(&self) -> Option<&Tarefa> {
        self.selected.and_then(|i| self.tarefas.get(i))
    }

    /// Move the cursor up. Returns false at the top.
    pub fn select_previous(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => {
                self.selected = Some(i - 1);
                true
            }
            None if !self.tarefas.is_empty() => {
                self.selected = Some(0);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor down. Returns false at the bottom.
    pub fn select_next(&mut self) -> bool {
        match self.selected {
            Some(i) if i + 1 < self.tarefas.len() => {
                self.selected = Some(i + 1);
                true
            }
            None if !self.tarefas.is_empty() => {
                self.selected = Some(0);
                true
            }
            _ => false,
        }
    }

    /// Sum of every custo, shown in the footer.
    pub fn total_custo(&self) -> f64 {
        self.tarefas.iter().map(|t| t.custo).sum()
    }

    /// Swap the selected tarefa with the one above it, exchanging their
    /// ordem values. Returns the pair of updates for the server, or None
    /// for a boundary no-op.
    pub fn move_selected_up(&mut self) -> Option<Vec<OrdemUpdate>> {
        let i = self.selected?;
        if i == 0 {
            return None;
        }
        let updates = self.swap_rows(i - 1, i);
        self.selected = Some(i - 1);
        Some(updates)
    }

    /// Swap the selected tarefa with the one below it. See [`Self::move_selected_up`].
    pub fn move_selected_down(&mut self) -> Option<Vec<OrdemUpdate>> {
        let i = self.selected?;
        if i + 1 >= self.tarefas.len() {
            return None;
        }
        let updates = self.swap_rows(i, i + 1);
        self.selected = Some(i + 1);
        Some(updates)
    }

    /// Swap two adjacent rows and their ordem values. Existing ordem
    /// values are exchanged rather than recomputed, so gaps left by
    /// deletions survive the swap.
    fn swap_rows(&mut self, upper: usize, lower: usize) -> Vec<OrdemUpdate> {
        let upper_ordem = self.tarefas[upper].ordem;
        self.tarefas[upper].ordem = self.tarefas[lower].ordem;
        self.tarefas[lower].ordem = upper_ordem;
        self.tarefas.swap(upper, lower);
        vec![
            OrdemUpdate {
                id: self.tarefas[upper].id,
                ordem: self.tarefas[upper].ordem,
            },
            OrdemUpdate {
                id: self.tarefas[lower].id,
                ordem: self.tarefas[lower].ordem,
            },
        ]
    }

    /// Lift the selected tarefa for carrying. False when there is nothing
    /// to carry or nowhere to carry it.
    pub fn start_carry(&mut self) -> bool {
        if self.selected.is_none() || self.tarefas.len() < 2 {
            return false;
        }
        self.carrying = true;
        true
    }

    /// Carry the lifted tarefa one row up. Ordem values stay untouched
    /// until the drop.
    pub fn carry_up(&mut self) -> bool {
        if !self.carrying {
            return false;
        }
        let Some(i) = self.selected else { return false };
        if i == 0 {
            return false;
        }
        self.tarefas.swap(i - 1, i);
        self.selected = Some(i - 1);
        true
    }

    /// Carry the lifted tarefa one row down.
    pub fn carry_down(&mut self) -> bool {
        if !self.carrying {
            return false;
        }
        let Some(i) = self.selected else { return false };
        if i + 1 >= self.tarefas.len() {
            return false;
        }
        self.tarefas.swap(i, i + 1);
        self.selected = Some(i + 1);
        true
    }

    /// Drop the carried tarefa: every row is renumbered to its position
    /// and the full list of updates is returned for the server.
    pub fn drop_carry(&mut self) -> Option<Vec<OrdemUpdate>> {
        if !self.carrying {
            return None;
        }
        self.carrying = false;
        for (position, tarefa) in self.tarefas.iter_mut().enumerate() {
            tarefa.ordem = position as i64 + 1;
        }
        Some(
            self.tarefas
                .iter()
                .map(|t| OrdemUpdate {
                    id: t.id,
                    ordem: t.ordem,
                })
                .collect(),
        )
    }

    /// Abort the carry and restore the ordem-sorted arrangement, keeping
    /// the cursor on the tarefa that was being carried.
    pub fn cancel_carry(&mut self) -> bool {
        if !self.carrying {
            return false;
        }
        self.carrying = false;
        let followed = self.selected_tarefa().map(|t| t.id);
        self.tarefas.sort_by_key(|t| t.ordem);
        if let Some(id) = followed {
            self.selected = self.tarefas.iter().position(|t| t.id == id);
        }
        true
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(TarefaForm::create());
    }

    /// Open the edit form for the selected tarefa. False without a selection.
    pub fn open_edit_form(&mut self) -> bool {
        let form = match self.selected_tarefa() {
            Some(tarefa) => TarefaForm::edit(tarefa),
            None => return false,
        };
        self.form = Some(form);
        true
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Mark the selected tarefa for deletion and open the confirmation
    /// prompt. False without a selection.
    pub fn request_delete(&mut self) -> bool {
        let (id, nome) = match self.selected_tarefa() {
            Some(t) => (t.id, t.nome.clone()),
            None => return false,
        };
        self.pending_delete = Some(id);
        self.dialog = Some(
            ConfirmationDialog::new(
                "Excluir Tarefa".to_string(),
                format!("Excluir a tarefa \"{}\"?", nome),
            )
            .with_buttons("Sim".to_string(), "Não".to_string())
            .dangerous(),
        );
        true
    }

    /// Close the prompt, handing back the id to delete when confirmed.
    pub fn resolve_delete(&mut self, confirmed: bool) -> Option<i64> {
        self.dialog = None;
        let id = self.pending_delete.take();
        if confirmed {
            id
        } else {
            None
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn tarefa(id: i64, nome: &str, ordem: i64) -> Tarefa {
        Tarefa {
            id,
            nome: nome.to_string(),
            custo: 100.0 * id as f64,
            data_limite: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            ordem,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    fn loaded(tarefas: Vec<Tarefa>) -> AppState {
        let mut state = AppState::new();
        state.set_tarefas(tarefas);
        state
    }

    fn ids(state: &AppState) -> Vec<i64> {
        state.tarefas.iter().map(|t| t.id).collect()
    }

    fn ordens(state: &AppState) -> Vec<i64> {
        state.tarefas.iter().map(|t| t.ordem).collect()
    }

    #[test]
    fn test_new_state_is_loading_with_no_selection() {
        let state = AppState::new();
        assert!(state.loading);
        assert!(state.tarefas.is_empty());
        assert_eq!(state.selected, None);
        assert_eq!(state.mode(), Mode::List);
    }

    #[test]
    fn test_set_tarefas_sorts_by_ordem_and_selects_first() {
        let state = loaded(vec![
            tarefa(1, "C", 3),
            tarefa(2, "A", 1),
            tarefa(3, "B", 2),
        ]);
        assert_eq!(ids(&state), vec![2, 3, 1]);
        assert_eq!(state.selected, Some(0));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_set_load_error_keeps_message() {
        let mut state = AppState::new();
        state.set_load_error("Falha ao carregar as tarefas. O backend está rodando?".to_string());
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Falha ao carregar as tarefas. O backend está rodando?")
        );
    }

    #[test]
    fn test_selection_stops_at_bounds() {
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        assert!(!state.select_previous());
        assert!(state.select_next());
        assert_eq!(state.selected, Some(1));
        assert!(!state.select_next());
        assert!(state.select_previous());
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn test_selection_on_empty_list_is_noop() {
        let mut state = loaded(vec![]);
        assert!(!state.select_next());
        assert!(!state.select_previous());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_refetch_clamps_selection_to_new_bounds() {
        let mut state = loaded(vec![
            tarefa(1, "A", 1),
            tarefa(2, "B", 2),
            tarefa(3, "C", 3),
        ]);
        state.selected = Some(2);
        state.set_tarefas(vec![tarefa(1, "A", 1)]);
        assert_eq!(state.selected, Some(0));

        state.set_tarefas(vec![]);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_move_up_at_top_is_boundary_noop() {
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        assert_eq!(state.move_selected_up(), None);
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(ordens(&state), vec![1, 2]);
    }

    #[test]
    fn test_move_down_at_bottom_is_boundary_noop() {
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        state.selected = Some(1);
        assert_eq!(state.move_selected_down(), None);
        assert_eq!(ids(&state), vec![1, 2]);
    }

    #[test]
    fn test_move_down_swaps_rows_and_ordens() {
        let mut state = loaded(vec![
            tarefa(1, "A", 1),
            tarefa(2, "B", 2),
            tarefa(3, "C", 3),
        ]);
        let updates = state.move_selected_down().unwrap();

        assert_eq!(ids(&state), vec![2, 1, 3]);
        assert_eq!(ordens(&state), vec![1, 2, 3]);
        assert_eq!(state.selected, Some(1));
        assert_eq!(
            updates,
            vec![
                OrdemUpdate { id: 2, ordem: 1 },
                OrdemUpdate { id: 1, ordem: 2 },
            ]
        );
    }

    #[test]
    fn test_move_up_preserves_ordem_gaps() {
        // Gap left by a deletion: ordens 1 and 3
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 3)]);
        state.selected = Some(1);
        let updates = state.move_selected_up().unwrap();

        assert_eq!(ids(&state), vec![2, 1]);
        assert_eq!(ordens(&state), vec![1, 3]);
        assert_eq!(state.selected, Some(0));
        assert_eq!(
            updates,
            vec![
                OrdemUpdate { id: 2, ordem: 1 },
                OrdemUpdate { id: 1, ordem: 3 },
            ]
        );
    }

    #[test]
    fn test_start_carry_needs_a_selection_and_a_neighbor() {
        let mut empty = loaded(vec![]);
        assert!(!empty.start_carry());

        let mut single = loaded(vec![tarefa(1, "A", 1)]);
        assert!(!single.start_carry());

        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        assert!(state.start_carry());
        assert_eq!(state.mode(), Mode::Carry);
    }

    #[test]
    fn test_carry_moves_rows_without_touching_ordens() {
        let mut state = loaded(vec![
            tarefa(1, "A", 1),
            tarefa(2, "B", 2),
            tarefa(3, "C", 3),
        ]);
        state.start_carry();
        assert!(state.carry_down());
        assert!(state.carry_down());
        assert!(!state.carry_down());

        assert_eq!(ids(&state), vec![2, 3, 1]);
        assert_eq!(ordens(&state), vec![2, 3, 1]);
        assert_eq!(state.selected, Some(2));
    }

    #[test]
    fn test_drop_carry_renumbers_every_row() {
        let mut state = loaded(vec![
            tarefa(1, "A", 1),
            tarefa(2, "B", 2),
            tarefa(3, "C", 3),
        ]);
        state.start_carry();
        state.carry_down();
        state.carry_down();
        let updates = state.drop_carry().unwrap();

        assert!(!state.carrying);
        assert_eq!(ids(&state), vec![2, 3, 1]);
        assert_eq!(ordens(&state), vec![1, 2, 3]);
        assert_eq!(
            updates,
            vec![
                OrdemUpdate { id: 2, ordem: 1 },
                OrdemUpdate { id: 3, ordem: 2 },
                OrdemUpdate { id: 1, ordem: 3 },
            ]
        );
    }

    #[test]
    fn test_cancel_carry_restores_sorted_order_and_follows_item() {
        let mut state = loaded(vec![
            tarefa(1, "A", 1),
            tarefa(2, "B", 2),
            tarefa(3, "C", 3),
        ]);
        state.start_carry();
        state.carry_down();
        state.carry_down();
        assert!(state.cancel_carry());

        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert_eq!(ordens(&state), vec![1, 2, 3]);
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.mode(), Mode::List);
    }

    #[test]
    fn test_refetch_aborts_a_carry_in_progress() {
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        state.start_carry();
        state.set_tarefas(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        assert!(!state.carrying);
    }

    #[test]
    fn test_drop_without_carry_returns_none() {
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        assert_eq!(state.drop_carry(), None);
        assert!(!state.cancel_carry());
    }

    #[test]
    fn test_total_custo_sums_all_rows() {
        let state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        assert_eq!(state.total_custo(), 300.0);
        assert_eq!(loaded(vec![]).total_custo(), 0.0);
    }

    #[test]
    fn test_open_edit_form_needs_a_selection() {
        let mut empty = loaded(vec![]);
        assert!(!empty.open_edit_form());
        assert!(empty.form.is_none());

        let mut state = loaded(vec![tarefa(1, "A", 1)]);
        assert!(state.open_edit_form());
        assert_eq!(state.mode(), Mode::Form);
        let form = state.form.as_ref().unwrap();
        assert_eq!(form.nome.value(), "A");
    }

    #[test]
    fn test_close_form_returns_to_list_mode() {
        let mut state = loaded(vec![tarefa(1, "A", 1)]);
        state.open_create_form();
        assert_eq!(state.mode(), Mode::Form);
        state.close_form();
        assert_eq!(state.mode(), Mode::List);
    }

    #[test]
    fn test_request_delete_opens_dialog_for_selected() {
        let mut state = loaded(vec![tarefa(1, "Reboco", 1)]);
        assert!(state.request_delete());
        assert_eq!(state.mode(), Mode::Confirm);
        assert_eq!(state.pending_delete, Some(1));
        let dialog = state.dialog.as_ref().unwrap();
        assert!(dialog.message.contains("Reboco"));
        assert!(dialog.dangerous);
    }

    #[test]
    fn test_request_delete_without_selection_is_noop() {
        let mut state = loaded(vec![]);
        assert!(!state.request_delete());
        assert!(state.dialog.is_none());
    }

    #[test]
    fn test_resolve_delete_confirmed_hands_back_id() {
        let mut state = loaded(vec![tarefa(1, "A", 1)]);
        state.request_delete();
        assert_eq!(state.resolve_delete(true), Some(1));
        assert!(state.dialog.is_none());
        assert_eq!(state.pending_delete, None);
    }

    #[test]
    fn test_resolve_delete_cancelled_clears_candidate() {
        let mut state = loaded(vec![tarefa(1, "A", 1)]);
        state.request_delete();
        assert_eq!(state.resolve_delete(false), None);
        assert!(state.dialog.is_none());
        assert_eq!(state.pending_delete, None);
    }

    #[test]
    fn test_mode_precedence_dialog_over_form_over_carry() {
        let mut state = loaded(vec![tarefa(1, "A", 1), tarefa(2, "B", 2)]);
        state.start_carry();
        assert_eq!(state.mode(), Mode::Carry);
        state.open_create_form();
        assert_eq!(state.mode(), Mode::Form);
        state.request_delete();
        assert_eq!(state.mode(), Mode::Confirm);
    }
}
