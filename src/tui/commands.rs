use tracing::{debug, error};

use crate::api::TodoApi;
use crate::models::TodoChanges;
use crate::store::TodoStore;

/// A user interaction, reduced to the server operation it implies.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Add { text: String },
    Toggle { id: i64 },
    SaveEdit { id: i64, text: String, completed: bool },
    Delete { id: i64 },
}

/// What the user should be told about a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Success(String),
    Error(String),
    Silent,
}

/// Perform one command: API call, then state transition on success.
///
/// The store is only touched after the server confirmed the operation, so a
/// failed call leaves it exactly as it was. Failures are logged here and
/// reported back as a generic message; the caller turns `Feedback` into a
/// toast.
pub fn dispatch(api: &dyn TodoApi, store: &mut TodoStore, command: Command) -> Feedback {
    match command {
        Command::Refresh => match api.fetch_all() {
            Ok(todos) => {
                debug!(count = todos.len(), "todo list refreshed");
                store.replace_all(todos);
                Feedback::Silent
            }
            Err(e) => {
                error!("fetching todos failed: {e}");
                Feedback::Error("Failed to load todos. Please try again.".to_string())
            }
        },
        Command::Add { text } => {
            let text = text.trim();
            // Whitespace-only input is silently ignored, no request is made.
            if text.is_empty() {
                return Feedback::Silent;
            }
            match api.create(text) {
                Ok(todo) => {
                    debug!(id = todo.id, "todo created");
                    store.push(todo);
                    Feedback::Success("Todo created successfully!".to_string())
                }
                Err(e) => {
                    error!("creating todo failed: {e}");
                    Feedback::Error("Failed to create todo. Please try again.".to_string())
                }
            }
        }
        Command::Toggle { id } => {
            let Some(completed) = store.get(id).map(|t| t.completed) else {
                return Feedback::Silent;
            };
            match api.update(id, &TodoChanges::completed(!completed)) {
                Ok(todo) => {
                    store.replace(todo);
                    // Toggling reports nothing on success, unlike the other paths.
                    Feedback::Silent
                }
                Err(e) => {
                    error!("toggling todo {id} failed: {e}");
                    Feedback::Error("Failed to update todo status. Please try again.".to_string())
                }
            }
        }
        Command::SaveEdit {
            id,
            text,
            completed,
        } => {
            match api.update(id, &TodoChanges::full(text.trim().to_string(), completed)) {
                Ok(todo) => {
                    store.replace(todo);
                    Feedback::Success("Todo updated successfully!".to_string())
                }
                Err(e) => {
                    error!("updating todo {id} failed: {e}");
                    Feedback::Error("Failed to update todo. Please try again.".to_string())
                }
            }
        }
        Command::Delete { id } => {
            // Look the record up locally first; deleting an id we do not
            // have is a no-op without a network call.
            let Some(text) = store.get(id).map(|t| t.text.clone()) else {
                return Feedback::Silent;
            };
            match api.remove(id, &text) {
                Ok(()) => {
                    store.remove(id);
                    Feedback::Success("Todo deleted successfully!".to_string())
                }
                Err(e) => {
                    error!("deleting todo {id} failed: {e}");
                    Feedback::Error("Failed to delete todo. Please try again.".to_string())
                }
            }
        }
    }
}
