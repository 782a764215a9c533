//! HRIS Gateway library crate.
//!
//! Re-exports the modules used by the binary and by integration tests in `tests/`.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod mcp;
pub mod models;
pub mod proxy;
pub mod state;
pub mod tools;

pub use state::AppState;
