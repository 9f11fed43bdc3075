//! Full CRUD lifecycle test against an in-process mock of the todo service.
//!
//! The mock mirrors the service's observed contract, including the literal
//! `:id` suffix in the update/delete paths (the id itself travels in the
//! query string) and the delete body that must carry the item's text. Those
//! paths don't fit a router's parameter syntax, so a fallback handler
//! matches method and path by hand.

use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};

use todoterm::api::{ApiClient, ApiError, TodoApi};
use todoterm::models::{CreateTodo, Todo, TodoChanges};

#[derive(Default)]
struct ServerState {
    todos: Vec<Todo>,
    next_id: i64,
    /// Every request as "METHOD uri body", for wire-level assertions.
    requests: Vec<String>,
}

type Db = Arc<Mutex<ServerState>>;

async fn handle(State(db): State<Db>, req: Request) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let body = to_bytes(req.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    let path = uri.path().to_string();
    let id = uri.query().and_then(id_param);

    {
        let mut state = db.lock().unwrap();
        state
            .requests
            .push(format!("{} {} {}", method, uri, String::from_utf8_lossy(&body)));
    }

    if method == Method::GET && path == "/get_all_todo" {
        let state = db.lock().unwrap();
        return Json(state.todos.clone()).into_response();
    }

    if method == Method::GET && path == "/get_todo_for_id" {
        let state = db.lock().unwrap();
        return match id.and_then(|id| state.todos.iter().find(|t| t.id == id)) {
            Some(todo) => Json(todo.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        };
    }

    if method == Method::POST && path == "/create_todo" {
        let Ok(input) = serde_json::from_slice::<CreateTodo>(&body) else {
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        };
        let mut state = db.lock().unwrap();
        state.next_id += 1;
        let todo = Todo {
            id: state.next_id,
            text: input.text,
            completed: false,
            create_at: "2024-06-01T12:00:00".to_string(),
        };
        state.todos.push(todo.clone());
        return Json(todo).into_response();
    }

    if method == Method::PATCH && path == "/update_todo:id" {
        let Some(id) = id else {
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        };
        let Ok(changes) = serde_json::from_slice::<TodoChanges>(&body) else {
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        };
        let mut state = db.lock().unwrap();
        let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) else {
            return StatusCode::NOT_FOUND.into_response();
        };
        if let Some(text) = changes.text {
            todo.text = text;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        return Json(todo.clone()).into_response();
    }

    if method == Method::DELETE && path == "/delete_todo:id" {
        let Some(id) = id else {
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        };
        if serde_json::from_slice::<CreateTodo>(&body).is_err() {
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        }
        let mut state = db.lock().unwrap();
        let len_before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        if state.todos.len() == len_before {
            return StatusCode::NOT_FOUND.into_response();
        }
        return Json(serde_json::json!({"success": true})).into_response();
    }

    StatusCode::NOT_FOUND.into_response()
}

fn id_param(query: &str) -> Option<i64> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("id="))?
        .parse()
        .ok()
}

/// Start the mock server on a random port, returning its address and a
/// handle on its state.
fn start_server() -> (std::net::SocketAddr, Db) {
    let db: Db = Arc::new(Mutex::new(ServerState::default()));

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let server_db = db.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = Router::new().fallback(handle).with_state(server_db);
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    (addr, db)
}

#[test]
fn crud_lifecycle() {
    let (addr, db) = start_server();
    let client = ApiClient::new(&format!("http://{addr}"));

    // List: should be empty.
    let todos = client.fetch_all().unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Create.
    let created = client.create("Buy milk").unwrap();
    assert_eq!(created.text, "Buy milk");
    assert!(!created.completed);

    // Get the created todo by id.
    let fetched = client.fetch_one(created.id).unwrap();
    assert_eq!(fetched, created);

    // Toggle: PATCH with only the completed field, other fields untouched.
    let updated = client
        .update(created.id, &TodoChanges::completed(true))
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.text, "Buy milk");
    assert_eq!(updated.create_at, created.create_at);

    {
        let state = db.lock().unwrap();
        let expected = format!(
            "PATCH /update_todo:id?id={} {{\"completed\":true}}",
            created.id
        );
        assert!(
            state.requests.iter().any(|r| r == &expected),
            "missing wire request {expected:?} in {:?}",
            state.requests
        );
    }

    // Full edit: both fields.
    let updated = client
        .update(created.id, &TodoChanges::full("Buy oat milk".to_string(), false))
        .unwrap();
    assert_eq!(updated.text, "Buy oat milk");
    assert!(!updated.completed);

    // List: exactly one item.
    let todos = client.fetch_all().unwrap();
    assert_eq!(todos.len(), 1);

    // Delete carries the item's current text in the body.
    client.remove(updated.id, &updated.text).unwrap();
    {
        let state = db.lock().unwrap();
        let expected = format!(
            "DELETE /delete_todo:id?id={} {{\"text\":\"Buy oat milk\"}}",
            updated.id
        );
        assert!(
            state.requests.iter().any(|r| r == &expected),
            "missing wire request {expected:?} in {:?}",
            state.requests
        );
    }

    // List: empty again.
    let todos = client.fetch_all().unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn non_success_maps_to_the_operation_error() {
    let (addr, _db) = start_server();
    let client = ApiClient::new(&format!("http://{addr}"));

    let err = client
        .update(999, &TodoChanges::completed(true))
        .unwrap_err();
    assert!(matches!(err, ApiError::Update(_)));

    let err = client.remove(999, "gone").unwrap_err();
    assert!(matches!(err, ApiError::Delete(_)));

    let err = client.fetch_one(999).unwrap_err();
    assert!(matches!(err, ApiError::Fetch(_)));

    // A server that 404s every path fails each operation with its own variant.
    let bad_client = ApiClient::new(&format!("http://{addr}/missing"));
    let err = bad_client.fetch_all().unwrap_err();
    assert!(matches!(err, ApiError::Fetch(_)));
    let err = bad_client.create("x").unwrap_err();
    assert!(matches!(err, ApiError::Create(_)));
}
