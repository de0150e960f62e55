//! The style model and formatting commands.
//!
//! [`model`] owns the canonical rules: which tags exist, how they combine,
//! how size and family stay exclusive, and how a character's effective
//! style is resolved. [`commands`] sits above it and maps user actions
//! (toggle, set size, nudge, set family) onto model operations.

pub mod commands;
pub mod model;

pub use commands::{FONT_FAMILIES, FONT_SIZE_PRESETS, FormatCommands};
pub use model::{
    DEFAULT_SIZE_PT, MAX_SIZE_PT, MIN_SIZE_PT, NUDGE_STEP_PT, ResolvedStyle, resolve_style,
};
