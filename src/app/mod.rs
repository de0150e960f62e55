//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Cursor, Direction, Mode, Model, PendingAction, PromptKind};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file: Option<PathBuf>,
    force_plain: bool,
}

impl App {
    /// Create a new application, optionally opening a file.
    pub const fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            force_plain: false,
        }
    }

    /// Treat the file as plain text regardless of its extension.
    #[must_use]
    pub const fn with_force_plain(mut self, force: bool) -> Self {
        self.force_plain = force;
        self
    }
}
