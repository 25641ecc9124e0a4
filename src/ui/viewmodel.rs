//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data: colors are already resolved from the
//! theme, labels are already chosen and text is already sanitized.
//!
//! # Example
//!
//! ```rust
//! use mailfeed::ui::viewmodel::{FooterInfo, HeaderInfo, MailboxView, PanelView, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: "Mail".to_string() },
//!     status: None,
//!     body: PanelView::Mailbox(MailboxView {
//!         title: "Inbox".to_string(),
//!         rows: vec![],
//!         empty_state: None,
//!     }),
//!     footer: FooterInfo { keybindings: "quit".to_string() },
//! };
//! assert!(vm.body.is_mailbox());
//! ```

use crate::domain::{EmailId, PostId};

/// Glyph shown on a post the viewer likes.
pub const FILLED_HEART: char = '\u{2764}';

/// Glyph shown on a post the viewer does not like.
pub const OUTLINE_HEART: char = '\u{2661}';

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Transient status message, cleared on every panel switch.
    pub status: Option<StatusLine>,

    /// The single visible panel.
    pub body: PanelView,

    /// Footer information (command hints).
    pub footer: FooterInfo,
}

/// The one region shown below the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// Mailbox list.
    Mailbox(MailboxView),
    /// Email detail; `None` while the email is loading.
    Email(Option<EmailView>),
    /// Compose form.
    Compose(ComposeView),
    /// Feed or profile page.
    Feed(FeedView),
}

impl PanelView {
    /// Whether the mailbox list is the visible panel.
    #[must_use]
    pub const fn is_mailbox(&self) -> bool {
        matches!(self, Self::Mailbox(_))
    }
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current panel.
    pub keybindings: String,
}

/// Status area text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No emails in Archive").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// The mailbox list panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxView {
    /// Mailbox heading (`Inbox`, `Sent`, `Archive`).
    pub title: String,
    pub rows: Vec<EmailRow>,
    pub empty_state: Option<EmptyState>,
}

/// One row of the mailbox list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRow {
    /// Id opened when the row is selected.
    pub id: EmailId,
    pub sender: String,
    pub subject: String,
    pub timestamp: String,
    pub read: bool,
    /// Row background as a hex color, resolved from the read state.
    pub background: String,
}

/// The email detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailView {
    pub id: EmailId,
    pub subject: String,
    pub sender: String,
    /// Recipients joined with `", "`.
    pub recipients: String,
    pub timestamp: String,
    pub body: String,
    /// `Archive` or `Unarchive`.
    pub archive_label: String,
}

/// The compose form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeView {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

/// A feed or profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    /// Present on profile pages only.
    pub profile: Option<ProfileView>,
    pub posts: Vec<PostView>,
    pub empty_state: Option<EmptyState>,
}

/// Follow counters and control of a profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub username: String,
    /// `None` until the follow state has loaded.
    pub followers: Option<usize>,
    pub following: Option<usize>,
    /// `Follow` / `Unfollow`; `None` when the viewer cannot follow.
    pub follow_label: Option<String>,
}

/// One post of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub id: PostId,
    pub author: String,
    pub title: String,
    pub contents: String,
    pub modified: String,
    /// `None` until the like state has loaded.
    pub like: Option<LikeView>,
    /// Present on posts the viewer authored.
    pub edit_control: Option<EditControl>,
    /// Present while the post is in edit mode.
    pub editor: Option<EditorView>,
    /// Edit control clicked and the editable fields not yet arrived.
    pub loading: bool,
    /// Submitted edit not yet confirmed.
    pub saving: bool,
}

/// Like glyph, count and liker list of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeView {
    pub glyph: char,
    pub count: u32,
    /// Liker names joined with `", "`; only present when `count > 0`.
    pub liked_by: Option<String>,
}

/// The edit control of an authored post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditControl {
    /// `false` while another post holds the edit lock.
    pub enabled: bool,
}

/// The inline edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub title: String,
    pub contents: String,
}
