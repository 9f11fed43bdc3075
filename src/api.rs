use thiserror::Error;

use crate::models::{CreateTodo, Todo, TodoChanges};

/// One variant per server operation. Anything that keeps the call from
/// returning a successful response (connect failure, non-2xx status, bad
/// body) lands in the variant for that operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to load todos: {0}")]
    Fetch(#[source] ureq::Error),
    #[error("Failed to create todo: {0}")]
    Create(#[source] ureq::Error),
    #[error("Failed to update todo: {0}")]
    Update(#[source] ureq::Error),
    #[error("Failed to delete todo: {0}")]
    Delete(#[source] ureq::Error),
}

/// The five server operations, as a seam so command handlers can be tested
/// against a mock instead of a live server.
pub trait TodoApi {
    fn fetch_all(&self) -> Result<Vec<Todo>, ApiError>;
    fn create(&self, text: &str) -> Result<Todo, ApiError>;
    fn update(&self, id: i64, changes: &TodoChanges) -> Result<Todo, ApiError>;
    fn remove(&self, id: i64, text: &str) -> Result<(), ApiError>;
}

/// Blocking HTTP client for the todo service.
///
/// Each call is a single fire-and-wait round trip on the agent's default
/// settings. No retries, no explicit timeouts, no cancellation.
///
/// The update/delete endpoints carry a literal `:id` in their path *and* the
/// id as a query parameter. The server routes on the literal path and reads
/// the query parameter; the path segment is reproduced verbatim and never
/// substituted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single todo by id.
    pub fn fetch_one(&self, id: i64) -> Result<Todo, ApiError> {
        let url = format!("{}/get_todo_for_id?id={}", self.base_url, id);
        self.agent
            .get(&url)
            .call()
            .and_then(|mut res| res.body_mut().read_json())
            .map_err(ApiError::Fetch)
    }
}

impl TodoApi for ApiClient {
    fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/get_all_todo", self.base_url);
        self.agent
            .get(&url)
            .call()
            .and_then(|mut res| res.body_mut().read_json())
            .map_err(ApiError::Fetch)
    }

    fn create(&self, text: &str) -> Result<Todo, ApiError> {
        let url = format!("{}/create_todo", self.base_url);
        self.agent
            .post(&url)
            .send_json(CreateTodo {
                text: text.to_string(),
            })
            .and_then(|mut res| res.body_mut().read_json())
            .map_err(ApiError::Create)
    }

    fn update(&self, id: i64, changes: &TodoChanges) -> Result<Todo, ApiError> {
        let url = format!("{}/update_todo:id?id={}", self.base_url, id);
        self.agent
            .patch(&url)
            .send_json(changes)
            .and_then(|mut res| res.body_mut().read_json())
            .map_err(ApiError::Update)
    }

    fn remove(&self, id: i64, text: &str) -> Result<(), ApiError> {
        // The server insists on the item's current text in the delete body.
        let url = format!("{}/delete_todo:id?id={}", self.base_url, id);
        self.agent
            .delete(&url)
            .force_send_body()
            .send_json(CreateTodo {
                text: text.to_string(),
            })
            .map(|_| ())
            .map_err(ApiError::Delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn base_url_kept_verbatim_otherwise() {
        let client = ApiClient::new("http://127.0.0.1:9000");
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
    }
}
