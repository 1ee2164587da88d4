//! Presentation layer handling the terminal UI and keyboard input.
//!
//! Screens are drawn with ratatui from the current [`crate::application::App`]
//! state; key presses are routed by input mode.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
