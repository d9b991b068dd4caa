//! Web front-end for loan approval prediction.
//!
//! Serves the application form, renders predictions, and proxies chat
//! messages to the hosted assistant.

pub mod config;
pub mod handlers;
pub mod render;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use server::{WebServer, router};
pub use state::AppState;
