//! Application lifecycle
//!
//! Startup preparation, the HTTP server loop and graceful shutdown.

pub mod lifetime;
pub mod server;

pub use server::{run_server, serve};
