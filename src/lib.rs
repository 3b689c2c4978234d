//! Width-aware multi-line text input core for terminal UIs.
//!
//! [`TextArea`] holds the text and cursor; [`keymap`] turns key presses into
//! editing actions; [`config`] loads user settings.

pub mod config;
pub mod keymap;
pub mod textarea;

pub use textarea::{Snapshot, TextArea};
