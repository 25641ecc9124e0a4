//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single source of truth for everything
//! on screen. It replaces reading and writing the page itself: the mail panels,
//! the loaded mailbox, the compose draft, every post's like and edit state and
//! the profile's follow state are plain fields, mutated only by the event
//! handler.
//!
//! # State Components
//!
//! - **Mail**: current [`Panel`], mailbox rows, opened email, compose draft, status text
//! - **Feed**: posts with like and edit state, the page-wide edit lock, profile follow state
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] projects the state into a
//! [`UIViewModel`]: theme colors are resolved, labels chosen and all
//! user-supplied text sanitized so nothing is ever interpreted as markup.
//!
//! # Example
//!
//! ```rust
//! use mailfeed::app::{AppKind, AppState};
//! use mailfeed::ui::theme::Theme;
//!
//! let state = AppState::new(AppKind::Mail, Theme::default());
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.body.is_mailbox());
//! ```

use super::modes::{AppKind, Panel, PostMode};
use crate::domain::{
    ComposeDraft, Email, EmailId, FeedPage, FollowSummary, LikeSummary, Mailbox, PostCard,
    PostFields, PostId, PostRecord,
};
use crate::ui::helpers::{sanitize_block, sanitize_inline};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ComposeView, EditControl, EditorView, EmailRow, EmailView, EmptyState, FeedView, FooterInfo,
    HeaderInfo, LikeView, MailboxView, PanelView, PostView, ProfileView, StatusLine, UIViewModel,
    FILLED_HEART, OUTLINE_HEART,
};

/// State of the email client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailState {
    /// The one visible panel.
    pub panel: Panel,

    /// Mailbox shown (or last shown) in the list panel.
    pub mailbox: Mailbox,

    /// Rows of the current mailbox, in server order.
    pub emails: Vec<Email>,

    /// Whether the current mailbox list is still in flight.
    pub loading: bool,

    /// Id of the email the detail panel was opened for.
    pub open_id: Option<EmailId>,

    /// The opened email once it has arrived.
    pub open_email: Option<Email>,

    /// Compose form contents.
    pub draft: ComposeDraft,

    /// Transient status area text.
    pub status: Option<String>,
}

impl Default for MailState {
    fn default() -> Self {
        Self {
            panel: Panel::Mailbox,
            mailbox: Mailbox::Inbox,
            emails: Vec::new(),
            loading: false,
            open_id: None,
            open_email: None,
            draft: ComposeDraft::default(),
            status: None,
        }
    }
}

impl MailState {
    /// Makes `panel` the visible panel and clears the status area.
    pub fn show(&mut self, panel: Panel) {
        self.panel = panel;
        self.status = None;
    }

    /// Shows `mailbox` with no rows, waiting for its list.
    pub fn show_mailbox(&mut self, mailbox: Mailbox) {
        self.show(Panel::Mailbox);
        self.mailbox = mailbox;
        self.emails.clear();
        self.loading = true;
        self.open_id = None;
        self.open_email = None;
    }

    /// Shows the detail panel for `id`, waiting for the email.
    pub fn show_email(&mut self, id: EmailId) {
        self.show(Panel::Email);
        self.open_id = Some(id);
        self.open_email = None;
    }

    /// Shows the compose form filled with `draft`.
    pub fn show_compose(&mut self, draft: ComposeDraft) {
        self.show(Panel::Compose);
        self.draft = draft;
    }

    /// Whether the list of `mailbox` is what the user is looking at.
    #[must_use]
    pub fn is_viewing_mailbox(&self, mailbox: Mailbox) -> bool {
        self.panel == Panel::Mailbox && self.mailbox == mailbox
    }

    /// Whether the detail panel is open for `id`.
    #[must_use]
    pub fn is_viewing_email(&self, id: EmailId) -> bool {
        self.panel == Panel::Email && self.open_id == Some(id)
    }
}

/// One post of the feed with its client-side state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostState {
    /// What the display view shows.
    pub card: PostCard,

    /// Like state, `None` until loaded.
    pub likes: Option<LikeSummary>,

    pub mode: PostMode,

    /// Edit form contents while in [`PostMode::Editing`].
    pub draft: PostFields,
}

impl PostState {
    #[must_use]
    pub fn new(card: PostCard) -> Self {
        Self {
            card,
            likes: None,
            mode: PostMode::Display,
            draft: PostFields::default(),
        }
    }

    /// Title and contents the display view currently shows.
    #[must_use]
    pub fn displayed_fields(&self) -> PostFields {
        PostFields {
            title: self.card.title.clone(),
            contents: self.card.contents.clone(),
        }
    }

    /// Applies a confirmed like toggle.
    ///
    /// The count moves by exactly one in the direction of `liked` and never
    /// drops below zero. The liker list is left as loaded.
    pub fn apply_like(&mut self, liked: bool) {
        let summary = self.likes.get_or_insert_with(LikeSummary::default);
        summary.like_count = if liked {
            summary.like_count.saturating_add(1)
        } else {
            summary.like_count.saturating_sub(1)
        };
        summary.is_liked = liked;
    }

    /// Shows `fields` in the display view.
    pub fn show_fields(&mut self, fields: PostFields) {
        self.card.title = fields.title;
        self.card.contents = fields.contents;
    }

    /// Patches the display view from the backend's copy of the post.
    pub fn apply_record(&mut self, record: &PostRecord) {
        self.show_fields(record.fields());
        if !record.modified.is_empty() {
            self.card.modified.clone_from(&record.modified);
        }
    }
}

/// Follow state of the profile a page belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileState {
    pub username: String,
    pub followers: usize,
    pub following: usize,
    pub is_following: bool,
    /// Whether the viewer gets a follow button.
    pub can_follow: bool,
    /// Whether the follow state has arrived.
    pub loaded: bool,
}

impl ProfileState {
    #[must_use]
    pub const fn new(username: String) -> Self {
        Self {
            username,
            followers: 0,
            following: 0,
            is_following: false,
            can_follow: false,
            loaded: false,
        }
    }

    /// Replaces the counters with the backend's follow state.
    pub fn apply_summary(&mut self, summary: &FollowSummary) {
        self.followers = summary.followers.len();
        self.following = summary.following.len();
        self.is_following = summary.is_following;
        self.can_follow = summary.user_logged_in;
        self.loaded = true;
    }

    /// Applies a confirmed follow toggle; the follower count never drops below zero.
    pub fn apply_toggle(&mut self, is_following: bool) {
        self.followers = if is_following {
            self.followers.saturating_add(1)
        } else {
            self.followers.saturating_sub(1)
        };
        self.is_following = is_following;
    }

    /// `Follow` or `Unfollow`.
    #[must_use]
    pub const fn follow_label(&self) -> &'static str {
        if self.is_following {
            "Unfollow"
        } else {
            "Follow"
        }
    }
}

/// State of the social feed page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub posts: Vec<PostState>,

    /// Post holding the page-wide edit session.
    ///
    /// While set, every edit control is disabled. Taken when an edit control is
    /// clicked and released when that edit's load fails or its submit completes.
    pub edit_lock: Option<PostId>,

    /// Present on profile pages.
    pub profile: Option<ProfileState>,
}

impl FeedState {
    /// Replaces the page with `page`.
    pub fn load_page(&mut self, page: &FeedPage) {
        self.posts = page.posts.iter().cloned().map(PostState::new).collect();
        self.edit_lock = None;
        self.profile = page.profile.clone().map(ProfileState::new);
    }

    #[must_use]
    pub fn post(&self, id: PostId) -> Option<&PostState> {
        self.posts.iter().find(|post| post.card.id == id)
    }

    pub fn post_mut(&mut self, id: PostId) -> Option<&mut PostState> {
        self.posts.iter_mut().find(|post| post.card.id == id)
    }

    /// Whether the edit control of `id` exists and can be clicked.
    #[must_use]
    pub fn edit_enabled(&self, id: PostId) -> bool {
        self.edit_lock.is_none() && self.post(id).is_some_and(|post| post.card.editable)
    }

    /// Releases the edit lock if `id` holds it.
    pub fn release_lock(&mut self, id: PostId) {
        if self.edit_lock == Some(id) {
            self.edit_lock = None;
            tracing::debug!(post_id = id, "edit lock released");
        }
    }

    /// The profile, if its username is `username`.
    pub fn profile_mut(&mut self, username: &str) -> Option<&mut ProfileState> {
        self.profile
            .as_mut()
            .filter(|profile| profile.username == username)
    }
}

/// Central application state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Which front end is running.
    pub app: AppKind,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    pub mail: MailState,

    pub feed: FeedState,
}

impl AppState {
    /// Creates an empty state for `app`.
    #[must_use]
    pub fn new(app: AppKind, theme: Theme) -> Self {
        Self {
            app,
            theme,
            mail: MailState::default(),
            feed: FeedState::default(),
        }
    }

    /// Computes a renderable UI view model from current state.
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] with exactly one visible panel: the current mail panel
    /// for the mail client, the feed for the network client.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let body = match self.app {
            AppKind::Mail => match self.mail.panel {
                Panel::Mailbox => PanelView::Mailbox(self.compute_mailbox()),
                Panel::Email => PanelView::Email(self.compute_email()),
                Panel::Compose => PanelView::Compose(self.compute_compose()),
            },
            AppKind::Network => PanelView::Feed(self.compute_feed()),
        };

        let status = match self.app {
            AppKind::Mail => self.mail.status.as_deref().map(|message| StatusLine {
                message: sanitize_inline(message),
            }),
            AppKind::Network => None,
        };

        UIViewModel {
            header: self.compute_header(),
            status,
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_mailbox(&self) -> MailboxView {
        let colors = &self.theme.colors;
        let rows: Vec<EmailRow> = self
            .mail
            .emails
            .iter()
            .map(|email| EmailRow {
                id: email.id,
                sender: sanitize_inline(&email.sender),
                subject: sanitize_inline(&email.subject),
                timestamp: sanitize_inline(&email.timestamp),
                read: email.read,
                background: if email.read {
                    colors.read_bg.clone()
                } else {
                    colors.unread_bg.clone()
                },
            })
            .collect();

        let title = self.mail.mailbox.title().to_string();
        let empty_state = (rows.is_empty() && !self.mail.loading && self.mail.status.is_none())
            .then(|| EmptyState {
                message: format!("No emails in {title}"),
                subtitle: "Use `compose` to write one".to_string(),
            });

        MailboxView {
            title,
            rows,
            empty_state,
        }
    }

    fn compute_email(&self) -> Option<EmailView> {
        self.mail.open_email.as_ref().map(|email| EmailView {
            id: email.id,
            subject: sanitize_inline(&email.subject),
            sender: sanitize_inline(&email.sender),
            recipients: sanitize_inline(&email.recipients.join(", ")),
            timestamp: sanitize_inline(&email.timestamp),
            body: sanitize_block(&email.body),
            archive_label: if email.archived { "Unarchive" } else { "Archive" }.to_string(),
        })
    }

    fn compute_compose(&self) -> ComposeView {
        let draft = &self.mail.draft;
        ComposeView {
            recipients: sanitize_inline(&draft.recipients),
            subject: sanitize_inline(&draft.subject),
            body: sanitize_block(&draft.body),
        }
    }

    fn compute_feed(&self) -> FeedView {
        let posts: Vec<PostView> = self
            .feed
            .posts
            .iter()
            .map(|post| self.compute_post(post))
            .collect();

        let profile = self.feed.profile.as_ref().map(|profile| ProfileView {
            username: sanitize_inline(&profile.username),
            followers: profile.loaded.then_some(profile.followers),
            following: profile.loaded.then_some(profile.following),
            follow_label: (profile.loaded && profile.can_follow)
                .then(|| profile.follow_label().to_string()),
        });

        let empty_state = posts.is_empty().then(|| EmptyState {
            message: "No posts yet".to_string(),
            subtitle: String::new(),
        });

        FeedView {
            profile,
            posts,
            empty_state,
        }
    }

    fn compute_post(&self, post: &PostState) -> PostView {
        let like = post.likes.as_ref().map(|likes| LikeView {
            glyph: if likes.is_liked {
                FILLED_HEART
            } else {
                OUTLINE_HEART
            },
            count: likes.like_count,
            liked_by: (likes.like_count > 0 && !likes.liked_by.is_empty())
                .then(|| sanitize_inline(&likes.liked_by.join(", "))),
        });

        let editing = post.mode == PostMode::Editing;
        let edit_control = (post.card.editable && !editing).then(|| EditControl {
            enabled: self.feed.edit_enabled(post.card.id),
        });
        let editor = editing.then(|| EditorView {
            title: sanitize_inline(&post.draft.title),
            contents: sanitize_block(&post.draft.contents),
        });

        PostView {
            id: post.card.id,
            author: sanitize_inline(&post.card.author),
            title: sanitize_inline(&post.card.title),
            contents: sanitize_block(&post.card.contents),
            modified: sanitize_inline(&post.card.modified),
            like,
            edit_control,
            editor,
            loading: post.mode == PostMode::Loading,
            saving: matches!(post.mode, PostMode::Saving { .. }),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.app {
            AppKind::Mail => match self.mail.panel {
                Panel::Mailbox => format!(" Mail: {} ({}) ", self.mail.mailbox.title(), self.mail.emails.len()),
                Panel::Email => " Mail: Message ".to_string(),
                Panel::Compose => " Mail: New Email ".to_string(),
            },
            AppKind::Network => self.feed.profile.as_ref().map_or_else(
                || " All Posts ".to_string(),
                |profile| format!(" {} ", sanitize_inline(&profile.username)),
            ),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.app {
            AppKind::Mail => match self.mail.panel {
                Panel::Mailbox => "open <id>  compose  inbox  sent  archive  quit",
                Panel::Email => "reply  toggle-archive  inbox  sent  archive  quit",
                Panel::Compose => "to <list>  subject <text>  body <text>  send  inbox  quit",
            },
            AppKind::Network => {
                let editing = self
                    .feed
                    .edit_lock
                    .and_then(|id| self.feed.post(id))
                    .is_some_and(|post| post.mode == PostMode::Editing);
                let can_follow = self
                    .feed
                    .profile
                    .as_ref()
                    .is_some_and(|profile| profile.loaded && profile.can_follow);
                if editing {
                    "title <text>  contents <text>  save  quit"
                } else if can_follow {
                    "like <id>  edit <id>  follow  quit"
                } else {
                    "like <id>  edit <id>  quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(id: EmailId, read: bool) -> Email {
        Email {
            id,
            sender: "a@x.com".to_string(),
            recipients: vec!["me@x.com".to_string(), "you@x.com".to_string()],
            subject: "Hi".to_string(),
            body: "line one\nline two".to_string(),
            timestamp: "t1".to_string(),
            read,
            archived: false,
        }
    }

    fn card(id: PostId, editable: bool) -> PostCard {
        PostCard {
            id,
            author: "alice".to_string(),
            title: format!("title {id}"),
            contents: format!("contents {id}"),
            modified: String::new(),
            editable,
        }
    }

    #[test]
    fn show_clears_status() {
        let mut mail = MailState {
            status: Some("boom".to_string()),
            ..MailState::default()
        };
        mail.show(Panel::Compose);
        assert_eq!(mail.panel, Panel::Compose);
        assert!(mail.status.is_none());
    }

    #[test]
    fn rows_take_background_from_read_state() {
        let mut state = AppState::new(AppKind::Mail, Theme::default());
        state.mail.emails = vec![email(1, false), email(2, true)];

        let PanelView::Mailbox(view) = state.compute_viewmodel().body else {
            panic!("expected mailbox panel");
        };
        assert_eq!(view.title, "Inbox");
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].background, "#D3D3D3");
        assert_eq!(view.rows[1].background, "#FFFFFF");
        assert!(view.empty_state.is_none());
    }

    #[test]
    fn empty_mailbox_shows_empty_state_once_loaded() {
        let mut state = AppState::new(AppKind::Mail, Theme::default());
        state.mail.show_mailbox(Mailbox::Archive);

        let PanelView::Mailbox(view) = state.compute_viewmodel().body else {
            panic!("expected mailbox panel");
        };
        assert!(view.empty_state.is_none());

        state.mail.loading = false;
        let PanelView::Mailbox(view) = state.compute_viewmodel().body else {
            panic!("expected mailbox panel");
        };
        assert_eq!(view.empty_state.unwrap().message, "No emails in Archive");
    }

    #[test]
    fn email_view_joins_recipients_and_labels_archive() {
        let mut state = AppState::new(AppKind::Mail, Theme::default());
        state.mail.show_email(1);
        assert_eq!(state.compute_viewmodel().body, PanelView::Email(None));

        let mut archived = email(1, true);
        archived.archived = true;
        state.mail.open_email = Some(archived);

        let PanelView::Email(Some(view)) = state.compute_viewmodel().body else {
            panic!("expected loaded email");
        };
        assert_eq!(view.recipients, "me@x.com, you@x.com");
        assert_eq!(view.archive_label, "Unarchive");
        assert_eq!(view.body, "line one\nline two");
    }

    #[test]
    fn control_characters_never_reach_the_view() {
        let mut state = AppState::new(AppKind::Mail, Theme::default());
        let mut hostile = email(1, false);
        hostile.subject = "\u{1b}[2JHi".to_string();
        state.mail.emails = vec![hostile];

        let PanelView::Mailbox(view) = state.compute_viewmodel().body else {
            panic!("expected mailbox panel");
        };
        assert_eq!(view.rows[0].subject, "[2JHi");
    }

    #[test]
    fn like_view_hides_liker_list_at_zero() {
        let mut post = PostState::new(card(1, false));
        post.likes = Some(LikeSummary {
            is_liked: true,
            like_count: 1,
            liked_by: vec!["bob".to_string()],
        });
        post.apply_like(false);

        let mut state = AppState::new(AppKind::Network, Theme::default());
        state.feed.posts = vec![post];

        let PanelView::Feed(view) = state.compute_viewmodel().body else {
            panic!("expected feed");
        };
        let like = view.posts[0].like.clone().unwrap();
        assert_eq!(like.glyph, OUTLINE_HEART);
        assert_eq!(like.count, 0);
        assert!(like.liked_by.is_none());
    }

    #[test]
    fn unlike_never_goes_below_zero() {
        let mut post = PostState::new(card(1, false));
        post.apply_like(false);
        assert_eq!(post.likes.unwrap().like_count, 0);
    }

    #[test]
    fn edit_lock_disables_every_control() {
        let mut state = AppState::new(AppKind::Network, Theme::default());
        state.feed.load_page(&FeedPage {
            profile: None,
            posts: vec![card(1, true), card(2, true), card(3, false)],
        });
        assert!(state.feed.edit_enabled(1));
        assert!(!state.feed.edit_enabled(3));

        state.feed.edit_lock = Some(1);
        let PanelView::Feed(view) = state.compute_viewmodel().body else {
            panic!("expected feed");
        };
        assert_eq!(view.posts[1].edit_control, Some(EditControl { enabled: false }));
        assert!(view.posts[2].edit_control.is_none());

        state.feed.release_lock(2);
        assert_eq!(state.feed.edit_lock, Some(1));
        state.feed.release_lock(1);
        assert!(state.feed.edit_enabled(2));
    }

    #[test]
    fn follow_button_needs_a_logged_in_viewer() {
        let mut profile = ProfileState::new("alice".to_string());
        profile.apply_summary(&FollowSummary {
            followers: vec![2, 3],
            following: vec![],
            is_following: false,
            user_logged_in: false,
        });

        let mut state = AppState::new(AppKind::Network, Theme::default());
        state.feed.profile = Some(profile);

        let PanelView::Feed(view) = state.compute_viewmodel().body else {
            panic!("expected feed");
        };
        let profile = view.profile.unwrap();
        assert_eq!(profile.followers, Some(2));
        assert!(profile.follow_label.is_none());
        assert_eq!(state.compute_viewmodel().header.title, " alice ");
    }

    #[test]
    fn record_patch_keeps_modified_when_missing() {
        let mut post = PostState::new(card(1, true));
        post.card.modified = "earlier".to_string();
        post.apply_record(&PostRecord {
            user_id: None,
            title: "new".to_string(),
            contents: "body".to_string(),
            created: String::new(),
            modified: String::new(),
        });
        assert_eq!(post.card.title, "new");
        assert_eq!(post.card.modified, "earlier");
    }
}
