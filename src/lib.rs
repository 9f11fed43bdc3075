pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod store;
pub mod tui;
pub mod utils;

pub use api::{ApiClient, ApiError, TodoApi};
pub use config::Config;
pub use models::Todo;
pub use store::TodoStore;
pub use utils::Profile;
