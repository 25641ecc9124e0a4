//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the front end (main.rs, via the
//! [`Runtime`](crate::runtime::Runtime)) and the worker layer. It implements the
//! event-driven architecture behind both clients.
//!
//! # Architecture
//!
//! ```text
//! User Command → Events → Event Handler → State Mutations → Actions → Requests
//!                            ↑                                           ↓
//!                            └────────────── Worker Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Application, panel and post mode types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{AppKind, Panel, PostMode};
pub use state::{AppState, FeedState, MailState, PostState, ProfileState};
