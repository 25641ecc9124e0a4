//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where trace output is written and expands `~` in user-supplied
//! paths (page seeds, theme files).

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
