pub mod dialog;
pub mod form;
pub mod status_bar;

pub use dialog::{ConfirmationDialog, ConfirmationDialogWidget, DialogFocus, DialogResult};
pub use form::{FormMode, TarefaForm};
pub use status_bar::StatusBarWidget;
