//! Domain layer for the mailfeed client.
//!
//! Plain data transfer types for the records the backend owns (emails, posts,
//! follow relations) plus the crate-wide error type. Nothing here talks to the
//! network or knows about rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`email`]: Emails, mailboxes, patches and compose drafts
//! - [`post`]: Feed posts, like state and editable fields
//! - [`profile`]: Follow relation of a profile page

pub mod email;
pub mod error;
pub mod post;
pub mod profile;

pub use email::{ComposeDraft, Email, EmailId, EmailPatch, Mailbox, SendReceipt};
pub use error::{MailfeedError, Result};
pub use post::{
    EditReceipt, FeedPage, LikeSummary, LikeToggle, PostCard, PostFields, PostId, PostRecord,
};
pub use profile::{FollowSummary, FollowToggle};
