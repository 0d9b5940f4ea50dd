pub mod cache;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod repo;
pub mod routes;
pub mod services;

pub use config::Config;
pub use errors::ApiError;
pub use services::AppState;
