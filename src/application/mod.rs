//! Application layer coordinating screens, input modes and background work.
//!
//! Sits between the domain rules and the terminal: it owns the wizard, the
//! upload tracker, the chat and the session, and folds worker results back
//! in on the UI thread.

pub mod state;

pub use state::*;
