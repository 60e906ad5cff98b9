/// News Service Library
///
/// A small news site: readers browse the latest news, logged-in users
/// comment on them, and authors edit or delete their own comments.
/// Comment text is screened by a forbidden-word filter before it is stored.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers returning page contexts as JSON
/// - `routes`: route table and URL builders
/// - `models`: news, comments, users and form contexts
/// - `services`: business logic (listing, moderation, ownership, accounts)
/// - `db`: repository traits with PostgreSQL and in-memory backends
/// - `middleware`: session identity and request metrics
/// - `state`: shared application state
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
