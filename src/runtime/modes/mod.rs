//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - CLI mode (helper commands that never start the server)

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;
