//! Infrastructure layer providing external service integrations.
//!
//! File-backed session storage, the upload backend client, command-line
//! configuration, log output and the system clipboard.

pub mod persistence;
pub mod upload_client;
pub mod config;
pub mod logging;
pub mod clipboard;

pub use persistence::*;
pub use upload_client::*;
pub use config::*;
pub use logging::*;
pub use clipboard::*;
