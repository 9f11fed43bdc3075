use crate::models::Todo;

/// In-memory list of todos mirroring the last confirmed server state.
///
/// Every mutation corresponds to a confirmed server response: the UI never
/// writes to the store before the matching HTTP call has succeeded. Order is
/// whatever the server returned, with created items appended at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh server snapshot.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    /// Append a newly created todo.
    pub fn push(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Replace the entry with the same id, keeping its position. A response
    /// for an id that is no longer present is dropped.
    pub fn replace(&mut self, todo: Todo) {
        if let Some(existing) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *existing = todo;
        }
    }

    /// Remove the entry with the given id, returning it if present.
    pub fn remove(&mut self, id: i64) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        Some(self.todos.remove(index))
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, text: &str, completed: bool) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            completed,
            create_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn replace_all_takes_server_order() {
        let mut store = TodoStore::new();
        store.push(todo(9, "old", false));
        store.replace_all(vec![todo(2, "b", false), todo(1, "a", true)]);
        let ids: Vec<i64> = store.todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn push_appends_at_end() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false)]);
        store.push(todo(2, "b", false));
        assert_eq!(store.todos().last().unwrap().id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_keeps_position() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false), todo(2, "b", false), todo(3, "c", false)]);
        store.replace(todo(2, "b2", true));
        let middle = &store.todos()[1];
        assert_eq!(middle.id, 2);
        assert_eq!(middle.text, "b2");
        assert!(middle.completed);
    }

    #[test]
    fn replace_unknown_id_is_dropped() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false)]);
        let before = store.clone();
        store.replace(todo(42, "ghost", true));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_filters_by_id() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false), todo(2, "b", false)]);
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut store = TodoStore::new();
        store.replace_all(vec![todo(1, "a", false)]);
        assert!(store.remove(7).is_none());
        assert_eq!(store.len(), 1);
    }
}
