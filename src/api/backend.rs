//! Backend abstraction.
//!
//! This module defines the [`Backend`] trait, one method per REST call the two
//! applications make. The request worker only depends on this trait, so the HTTP
//! implementation can be swapped for a test double without touching the handler.
//!
//! # Design
//!
//! The trait is minimal and mirrors the endpoints, not a generic HTTP client. Each
//! method maps to exactly one request; none of them retry.

use crate::domain::error::Result;
use crate::domain::{
    ComposeDraft, Email, EmailId, EmailPatch, FollowSummary, FollowToggle, LikeSummary,
    LikeToggle, Mailbox, PostFields, PostId, PostRecord, SendReceipt,
};

/// Abstraction over the REST backend.
///
/// # Implementations
///
/// - [`HttpBackend`](crate::api::HttpBackend): blocking `reqwest` client (default)
///
/// # Examples
///
/// ```no_run
/// use mailfeed::api::{Backend, HttpBackend};
/// use mailfeed::domain::Mailbox;
///
/// let backend = HttpBackend::new("http://localhost:8000", None, 10)?;
/// let inbox = backend.list_mailbox(Mailbox::Inbox)?;
/// # Ok::<(), mailfeed::MailfeedError>(())
/// ```
pub trait Backend: Send {
    /// Lists the emails of a mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the mailbox.
    fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>>;

    /// Fetches a single email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the email does not exist.
    fn get_email(&self, id: EmailId) -> Result<Email>;

    /// Applies a partial update to an email's flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the update.
    fn update_email(&self, id: EmailId, patch: EmailPatch) -> Result<()>;

    /// Sends a composed email.
    ///
    /// # Errors
    ///
    /// Returns an application error when the backend rejects the draft (for
    /// example an unknown recipient).
    fn send_email(&self, draft: &ComposeDraft) -> Result<SendReceipt>;

    /// Fetches the editable fields of a post owned by the viewer.
    ///
    /// # Errors
    ///
    /// Returns an application error when the viewer does not own the post.
    fn get_post(&self, id: PostId) -> Result<PostRecord>;

    /// Replaces a post's title and contents, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the viewer does not own the post.
    fn edit_post(&self, id: PostId, fields: &PostFields) -> Result<PostRecord>;

    /// Fetches like count, likers and the viewer's like state of a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the post does not exist.
    fn get_likes(&self, id: PostId) -> Result<LikeSummary>;

    /// Toggles the viewer's like on a post.
    ///
    /// # Errors
    ///
    /// Returns an application error for anonymous viewers.
    fn toggle_like(&self, id: PostId) -> Result<LikeToggle>;

    /// Fetches the follow relation of a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn get_follow(&self, username: &str) -> Result<FollowSummary>;

    /// Toggles whether the viewer follows a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn toggle_follow(&self, username: &str) -> Result<FollowToggle>;
}
