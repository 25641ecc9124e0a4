//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Text sanitizing and width helpers
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    ComposeView, EditControl, EditorView, EmailRow, EmailView, EmptyState, FeedView, FooterInfo,
    HeaderInfo, LikeView, MailboxView, PanelView, PostView, ProfileView, StatusLine, UIViewModel,
};
