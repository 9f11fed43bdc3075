use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{ApiClient, ApiError, TodoApi};
use crate::models::TodoChanges;
use crate::utils::format_created_at;

#[derive(Parser)]
#[command(name = "todoterm")]
#[command(about = "Terminal client for a todo REST service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the todo service (overrides the configured value)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Use development mode (uses separate dev config/log directory)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// List all todos
    List,
    /// Create a new todo
    Add {
        /// Todo text
        text: String,
    },
    /// Show a single todo by id
    Show {
        /// Todo id
        id: i64,
    },
    /// Mark a todo as completed
    Done {
        /// Todo id
        id: i64,
    },
    /// Delete a todo
    Rm {
        /// Todo id
        id: i64,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    ApiError(#[from] ApiError),
    #[error("Todo text must not be empty")]
    EmptyText,
}

/// Handle the list command
pub fn handle_list(api: &ApiClient) -> Result<(), CliError> {
    let todos = api.fetch_all()?;
    if todos.is_empty() {
        println!("No todos.");
        return Ok(());
    }
    for todo in &todos {
        let mark = if todo.completed { "x" } else { " " };
        println!(
            "{:>4} [{}] {}  (created {})",
            todo.id,
            mark,
            todo.text,
            format_created_at(&todo.create_at)
        );
    }
    Ok(())
}

/// Handle the add command
pub fn handle_add(text: String, api: &ApiClient) -> Result<(), CliError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CliError::EmptyText);
    }

    let todo = api.create(text)?;
    println!("Todo created successfully (ID: {})", todo.id);
    Ok(())
}

/// Handle the show command
pub fn handle_show(id: i64, api: &ApiClient) -> Result<(), CliError> {
    let todo = api.fetch_one(id)?;
    let mark = if todo.completed { "x" } else { " " };
    println!("{:>4} [{}] {}", todo.id, mark, todo.text);
    println!("     created {}", format_created_at(&todo.create_at));
    Ok(())
}

/// Handle the done command
pub fn handle_done(id: i64, api: &ApiClient) -> Result<(), CliError> {
    let todo = api.update(id, &TodoChanges::completed(true))?;
    println!("Todo {} marked as done: {}", todo.id, todo.text);
    Ok(())
}

/// Handle the rm command
pub fn handle_rm(id: i64, api: &ApiClient) -> Result<(), CliError> {
    // The delete endpoint wants the item's current text in the body.
    let todo = api.fetch_one(id)?;
    api.remove(todo.id, &todo.text)?;
    println!("Todo {} deleted", todo.id);
    Ok(())
}
