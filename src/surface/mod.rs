//! The text surface: a rope-backed character sequence with a tag overlay.
//!
//! This module provides:
//! - [`TextSurface`]: the ordered, mutable character sequence the rest of
//!   the crate edits, iterates, and styles
//! - [`TagKey`] / [`TagTable`]: value-keyed formatting tags mapped to
//!   interval sets of half-open character ranges

mod buffer;
mod tags;

pub use buffer::TextSurface;
pub use tags::{HalfPoints, RangeSet, TagKey, TagKind, TagTable};
