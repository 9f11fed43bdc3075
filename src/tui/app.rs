use ratatui::widgets::ListState;
use std::time::Instant;

use crate::models::Todo;
use crate::tui::commands::Feedback;
use crate::tui::widgets::editor::Editor;
use crate::{ApiClient, Config, TodoStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Input,
    Edit,
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Text,
    Completed,
    Save,
    Cancel,
}

/// Edit modal state, pre-filled from the record being edited.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub id: i64,
    pub current_field: EditField,
    pub text: Editor,
    pub completed: bool,
}

impl EditForm {
    pub fn for_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            current_field: EditField::Text,
            text: Editor::from_string(todo.text.clone()),
            completed: todo.completed,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            EditField::Text => EditField::Completed,
            EditField::Completed => EditField::Save,
            EditField::Save => EditField::Cancel,
            EditField::Cancel => EditField::Text,
        };
    }

    pub fn prev_field(&mut self) {
        self.current_field = match self.current_field {
            EditField::Text => EditField::Cancel,
            EditField::Completed => EditField::Text,
            EditField::Save => EditField::Completed,
            EditField::Cancel => EditField::Save,
        };
    }
}

/// Delete confirmation modal state. `selection` indexes the options:
/// 0 = Delete, 1 = Cancel.
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub todo: Todo,
    pub selection: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

/// Stack of transient notifications. Toasts expire individually after
/// 3 seconds; there is no dismissal control and no cap on the stack.
#[derive(Debug, Clone, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    const TOAST_TIMEOUT_SECS: u64 = 3;

    pub fn success(&mut self, message: String) {
        self.push(message, ToastKind::Success);
    }

    pub fn error(&mut self, message: String) {
        self.push(message, ToastKind::Error);
    }

    fn push(&mut self, message: String, kind: ToastKind) {
        self.toasts.push(Toast {
            message,
            kind,
            created: Instant::now(),
        });
    }

    /// Drop toasts older than the timeout; called once per loop iteration.
    pub fn prune_expired(&mut self) {
        self.toasts
            .retain(|t| t.created.elapsed().as_secs() < Self::TOAST_TIMEOUT_SECS);
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
    /// True until the initial fetch has resolved.
    pub loading: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: Mode::View,
            selected_index: 0,
            list_state: ListState::default(),
            loading: true,
        }
    }
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub api: ApiClient,

    // The client-side mirror of server state
    pub store: TodoStore,

    // Grouped state
    pub ui: UiState,
    pub input: Editor,
    pub edit: Option<EditForm>,
    pub confirm: Option<ConfirmState>,
    pub toasts: ToastState,
}

impl App {
    /// The store starts empty; the event loop performs the initial fetch
    /// after drawing the first (loading) frame.
    pub fn new(config: Config, api: ApiClient) -> Self {
        Self {
            config,
            api,
            store: TodoStore::new(),
            ui: UiState::default(),
            input: Editor::new(),
            edit: None,
            confirm: None,
            toasts: ToastState::default(),
        }
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.store.todos().get(self.ui.selected_index)
    }

    /// Clamp the selection after the list changed size.
    pub fn adjust_selected_index(&mut self) {
        if self.store.is_empty() {
            self.ui.selected_index = 0;
        } else if self.ui.selected_index >= self.store.len() {
            self.ui.selected_index = self.store.len() - 1;
        }
        self.sync_list_state();
    }

    /// Sync ListState with selected_index for proper scrolling
    pub fn sync_list_state(&mut self) {
        if self.store.is_empty() {
            self.ui.list_state.select(None);
        } else {
            self.ui.list_state.select(Some(self.ui.selected_index));
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.ui.selected_index > 0 {
            self.ui.selected_index -= 1;
            self.sync_list_state();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.ui.selected_index < self.store.len().saturating_sub(1) {
            self.ui.selected_index += 1;
            self.sync_list_state();
        }
    }

    pub fn select_last(&mut self) {
        if !self.store.is_empty() {
            self.ui.selected_index = self.store.len() - 1;
        }
        self.sync_list_state();
    }

    pub fn enter_input_mode(&mut self) {
        self.ui.mode = Mode::Input;
    }

    pub fn exit_input_mode(&mut self) {
        // Input text is kept; a failed create must not eat what was typed.
        self.ui.mode = Mode::View;
    }

    /// Open the edit modal for the selected todo. No selection, no modal.
    pub fn enter_edit_mode(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.edit = Some(EditForm::for_todo(todo));
            self.ui.mode = Mode::Edit;
        }
    }

    pub fn close_edit_modal(&mut self) {
        self.edit = None;
        self.ui.mode = Mode::View;
    }

    pub fn open_delete_confirm(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.confirm = Some(ConfirmState {
                todo: todo.clone(),
                selection: 0,
            });
            self.ui.mode = Mode::ConfirmDelete;
        }
    }

    pub fn close_delete_confirm(&mut self) {
        self.confirm = None;
        self.ui.mode = Mode::View;
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::View;
    }

    /// Turn command feedback into a toast.
    pub fn apply_feedback(&mut self, feedback: Feedback) {
        match feedback {
            Feedback::Success(message) => self.toasts.success(message),
            Feedback::Error(message) => self.toasts.error(message),
            Feedback::Silent => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, text: &str) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            completed: false,
            create_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    fn app_with_todos(todos: Vec<Todo>) -> App {
        let mut app = App::new(Config::default(), ApiClient::new("http://localhost:8000"));
        app.store.replace_all(todos);
        app.sync_list_state();
        app
    }

    #[test]
    fn selection_clamps_after_removal() {
        let mut app = app_with_todos(vec![todo(1, "a"), todo(2, "b")]);
        app.ui.selected_index = 1;
        app.store.remove(2);
        app.adjust_selected_index();
        assert_eq!(app.ui.selected_index, 0);
        assert_eq!(app.ui.list_state.selected(), Some(0));
    }

    #[test]
    fn selection_stops_at_bounds() {
        let mut app = app_with_todos(vec![todo(1, "a"), todo(2, "b")]);
        app.move_selection_up();
        assert_eq!(app.ui.selected_index, 0);
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.ui.selected_index, 1);
    }

    #[test]
    fn edit_mode_requires_a_selection() {
        let mut app = app_with_todos(Vec::new());
        app.enter_edit_mode();
        assert!(app.edit.is_none());
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn edit_form_prefills_from_selected_todo() {
        let mut app = app_with_todos(vec![todo(7, "Buy milk")]);
        app.enter_edit_mode();
        let form = app.edit.as_ref().unwrap();
        assert_eq!(form.id, 7);
        assert_eq!(form.text.content(), "Buy milk");
        assert!(!form.completed);
    }

    #[test]
    fn edit_field_cycle_wraps() {
        let mut form = EditForm::for_todo(&todo(1, "a"));
        form.next_field();
        form.next_field();
        form.next_field();
        form.next_field();
        assert_eq!(form.current_field, EditField::Text);
        form.prev_field();
        assert_eq!(form.current_field, EditField::Cancel);
    }

    #[test]
    fn toasts_stack_in_arrival_order() {
        let mut toasts = ToastState::default();
        toasts.success("first".to_string());
        toasts.error("second".to_string());
        assert_eq!(toasts.toasts.len(), 2);
        assert_eq!(toasts.toasts[0].message, "first");
        assert_eq!(toasts.toasts[1].kind, ToastKind::Error);
    }
}
