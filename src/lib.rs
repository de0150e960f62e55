// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. surface::TextSurface)
    clippy::module_name_repetitions
)]

//! # Scriv
//!
//! A terminal rich text editor with RTF support.
//!
//! Scriv edits styled text (bold, italic, underline, point size, font
//! family) and persists it as plain text or as a simplified RTF dialect.
//! Styling lives in a tag overlay on top of a rope-backed text buffer;
//! the RTF codec converts between that model and a byte stream with a
//! hand-rolled control-word parser.
//!
//! ## Architecture
//!
//! Scriv uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`surface`]: Rope-backed text buffer with the formatting tag overlay
//! - [`style`]: Style model (tag combination rules) and format commands
//! - [`rtf`]: RTF encoder and decoder
//! - [`storage`]: File formats, load/save, and the editing session
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI rendering

pub mod app;
pub mod rtf;
pub mod storage;
pub mod style;
pub mod surface;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::storage::Session;
    pub use crate::style::{FormatCommands, ResolvedStyle};
    pub use crate::surface::{TagKey, TextSurface};
}
