//! Application and panel mode types.
//!
//! These enums replace display flags on page regions: the mail client is always
//! in exactly one [`Panel`], and every feed post is in exactly one [`PostMode`].
//!
//! # Example
//!
//! ```rust
//! use mailfeed::app::modes::{AppKind, Panel};
//!
//! let app: AppKind = "network".parse().unwrap();
//! assert_eq!(app, AppKind::Network);
//! assert_ne!(Panel::Mailbox, Panel::Compose);
//! ```

use crate::domain::error::MailfeedError;
use crate::domain::PostFields;
use std::str::FromStr;

/// Which of the two front ends is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppKind {
    /// Single-page email client.
    #[default]
    Mail,
    /// Social feed with likes, inline editing and follows.
    Network,
}

impl FromStr for AppKind {
    type Err = MailfeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mail" => Ok(Self::Mail),
            "network" | "feed" => Ok(Self::Network),
            other => Err(MailfeedError::Config(format!("unknown app: {other}"))),
        }
    }
}

/// Mutually exclusive top-level regions of the mail client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// List of the current mailbox.
    Mailbox,
    /// One opened email with reply and archive controls.
    Email,
    /// Compose form.
    Compose,
}

/// Display state of one feed post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostMode {
    /// Normal display view.
    Display,
    /// Edit control clicked, waiting for the editable fields.
    Loading,
    /// Edit form shown.
    Editing,
    /// Submitted edit shown optimistically while the backend stores it.
    ///
    /// `previous` is what was displayed before the submit, restored on failure.
    Saving {
        previous: PostFields,
    },
}

impl PostMode {
    /// Whether the post shows its display view (as opposed to a form or spinner).
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        matches!(self, Self::Display | Self::Saving { .. })
    }
}
