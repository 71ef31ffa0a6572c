//! MailSift web front-end
//!
//! Serves a single-page form that classifies pasted email text as spam or
//! not spam, plus a JSON API, a health probe and Prometheus metrics.

pub mod app;
pub mod cli;
pub mod config;
pub mod routes;
pub mod state;
pub mod template;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
pub use template::IndexPage;
