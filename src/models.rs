use serde::{Deserialize, Serialize};

/// A todo record as returned by the server.
///
/// `id` and `create_at` are assigned server-side and never change from the
/// client's point of view. `create_at` is kept as the raw ISO 8601 string the
/// server sent; it is only parsed when formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub create_at: String,
}

/// Request body for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// Partial update body. Only fields that are set are serialized, so a toggle
/// sends `{"completed": ...}` alone and an edit sends both fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoChanges {
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn full(text: String, completed: bool) -> Self {
        Self {
            text: Some(text),
            completed: Some(completed),
        }
    }
}
