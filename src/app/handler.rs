//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user commands and
//! backend responses, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the front end or, wrapped in [`Event::Response`], from the request worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on [`AppState`]
//! 4. Actions are collected and returned for execution
//!
//! The handler never performs I/O. Every backend call leaves as an
//! [`Action::Request`] and its outcome comes back as exactly one
//! [`Event::Response`].
//!
//! # Failure routing
//!
//! - Mail list and detail failures go to the status area.
//! - A failed send goes to the status area and raises an alert.
//! - Feed failures caused by a click (like, follow, edit) raise an alert.
//! - Background loads (mark-read, like and follow state on page load) are only logged.
//!
//! # Example
//!
//! ```rust
//! use mailfeed::app::{handle_event, Action, AppKind, AppState, Event};
//! use mailfeed::domain::Mailbox;
//! use mailfeed::ui::theme::Theme;
//!
//! let mut state = AppState::new(AppKind::Mail, Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::LoadMailbox(Mailbox::Sent))?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Request(_)]));
//! # Ok::<(), mailfeed::domain::MailfeedError>(())
//! ```

use super::modes::{Panel, PostMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{ComposeDraft, EmailId, FeedPage, Mailbox, PostId};
use crate::worker::{ApiRequest, ApiResponse};

/// Prefix of failures that did not come with a message from the backend.
pub const UNREACHABLE_PREFIX: &str = "Server unavailable: ";

/// Events triggered by user commands or backend responses.
///
/// Per-item events carry the id of the item they act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Shows a mailbox and fetches its list.
    LoadMailbox(Mailbox),
    /// Shows the detail panel for an email and fetches it.
    OpenEmail(EmailId),
    /// Opens compose prefilled as a reply to the opened email.
    Reply,
    /// Flips the archived flag of the opened email.
    ToggleArchive,
    /// Opens an empty compose form.
    Compose,
    /// Replaces the compose recipients (comma-separated).
    SetRecipients(String),
    /// Replaces the compose subject.
    SetSubject(String),
    /// Replaces the compose body.
    SetBody(String),
    /// Sends the compose form.
    SendEmail,

    /// A feed or profile page was loaded.
    FeedLoaded(FeedPage),
    /// The like control of a post was clicked.
    ToggleLike { post_id: PostId },
    /// The edit control of a post was clicked.
    OpenEditor { post_id: PostId },
    /// Replaces the title in the open edit form.
    SetEditTitle(String),
    /// Replaces the contents in the open edit form.
    SetEditContents(String),
    /// Saves the open edit form.
    SubmitEdit,
    /// The follow button of the profile was clicked.
    ToggleFollow,

    /// Outcome of a request issued by an earlier [`Action::Request`].
    Response(ApiResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the view changed, and the actions to execute in order. Events that
/// do not apply to the current state (a reply with no opened email, a follow
/// click without a follow button) are ignored.
///
/// # Errors
///
/// Reserved for state transitions that cannot be completed; none of the
/// current transitions fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::LoadMailbox(mailbox) => {
            tracing::debug!(mailbox = %mailbox, "loading mailbox");
            state.mail.show_mailbox(*mailbox);
            Ok((true, vec![Action::Request(ApiRequest::load_mailbox(*mailbox))]))
        }
        Event::OpenEmail(id) => {
            state.mail.show_email(*id);
            Ok((true, vec![Action::Request(ApiRequest::load_email(*id))]))
        }
        Event::Reply => {
            let Some(email) = state.mail.open_email.as_ref().filter(|_| state.mail.panel == Panel::Email) else {
                tracing::debug!("reply without an opened email");
                return Ok((false, vec![]));
            };
            let draft = ComposeDraft::reply_to(email);
            state.mail.show_compose(draft);
            Ok((true, vec![]))
        }
        Event::ToggleArchive => {
            let Some(email) = state.mail.open_email.as_ref().filter(|_| state.mail.panel == Panel::Email) else {
                tracing::debug!("archive toggle without an opened email");
                return Ok((false, vec![]));
            };
            let request = ApiRequest::set_archived(email.id, !email.archived);
            Ok((false, vec![Action::Request(request)]))
        }
        Event::Compose => {
            state.mail.show_compose(ComposeDraft::default());
            Ok((true, vec![]))
        }
        Event::SetRecipients(text) | Event::SetSubject(text) | Event::SetBody(text) => {
            if state.mail.panel != Panel::Compose {
                return Ok((false, vec![]));
            }
            let draft = &mut state.mail.draft;
            let field = match event {
                Event::SetRecipients(_) => &mut draft.recipients,
                Event::SetSubject(_) => &mut draft.subject,
                _ => &mut draft.body,
            };
            field.clone_from(text);
            Ok((true, vec![]))
        }
        Event::SendEmail => {
            if state.mail.panel != Panel::Compose {
                return Ok((false, vec![]));
            }
            let request = ApiRequest::send_email(state.mail.draft.clone());
            Ok((false, vec![Action::Request(request)]))
        }

        Event::FeedLoaded(page) => {
            state.feed.load_page(page);
            tracing::debug!(
                posts = page.posts.len(),
                profile = page.profile.as_deref().unwrap_or(""),
                "feed loaded"
            );

            let mut actions: Vec<Action> = page
                .posts
                .iter()
                .map(|post| Action::Request(ApiRequest::load_likes(post.id)))
                .collect();
            if let Some(username) = &page.profile {
                actions.push(Action::Request(ApiRequest::load_follow(username.clone())));
            }
            Ok((true, actions))
        }
        Event::ToggleLike { post_id } => {
            if state.feed.post(*post_id).is_none() {
                tracing::debug!(post_id, "like on unknown post");
                return Ok((false, vec![]));
            }
            Ok((false, vec![Action::Request(ApiRequest::toggle_like(*post_id))]))
        }
        Event::OpenEditor { post_id } => {
            if !state.feed.edit_enabled(*post_id) {
                tracing::debug!(post_id, lock = ?state.feed.edit_lock, "edit control disabled");
                return Ok((false, vec![]));
            }
            state.feed.edit_lock = Some(*post_id);
            if let Some(post) = state.feed.post_mut(*post_id) {
                post.mode = PostMode::Loading;
            }
            tracing::debug!(post_id, "edit lock taken");
            Ok((true, vec![Action::Request(ApiRequest::load_post(*post_id))]))
        }
        Event::SetEditTitle(text) | Event::SetEditContents(text) => {
            let Some(post) = editing_post(state) else {
                return Ok((false, vec![]));
            };
            if matches!(event, Event::SetEditTitle(_)) {
                post.draft.title.clone_from(text);
            } else {
                post.draft.contents.clone_from(text);
            }
            Ok((true, vec![]))
        }
        Event::SubmitEdit => {
            let Some(post) = editing_post(state) else {
                tracing::debug!("submit without an open editor");
                return Ok((false, vec![]));
            };
            let fields = post.draft.clone();
            let previous = post.displayed_fields();
            post.show_fields(fields.clone());
            post.mode = PostMode::Saving { previous };

            let request = ApiRequest::submit_post_edit(post.card.id, fields);
            Ok((true, vec![Action::Request(request)]))
        }
        Event::ToggleFollow => {
            let Some(profile) = state
                .feed
                .profile
                .as_ref()
                .filter(|profile| profile.loaded && profile.can_follow)
            else {
                tracing::debug!("follow without a follow button");
                return Ok((false, vec![]));
            };
            let request = ApiRequest::toggle_follow(profile.username.clone());
            Ok((false, vec![Action::Request(request)]))
        }

        Event::Response(response) => handle_response(state, response),
    }
}

/// The post whose edit form is open, if any.
fn editing_post(state: &mut AppState) -> Option<&mut crate::app::state::PostState> {
    let id = state.feed.edit_lock?;
    state
        .feed
        .post_mut(id)
        .filter(|post| post.mode == PostMode::Editing)
}

fn handle_response(state: &mut AppState, response: &ApiResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        ApiResponse::MailboxLoaded { mailbox, emails } => {
            if !state.mail.is_viewing_mailbox(*mailbox) {
                tracing::debug!(mailbox = %mailbox, "dropping stale mailbox list");
                return Ok((false, vec![]));
            }
            state.mail.emails.clone_from(emails);
            state.mail.loading = false;
            Ok((true, vec![]))
        }
        ApiResponse::EmailLoaded { email } => {
            if !state.mail.is_viewing_email(email.id) {
                tracing::debug!(id = email.id, "dropping stale email");
                return Ok((false, vec![]));
            }
            let id = email.id;
            state.mail.open_email = Some(email.clone());
            Ok((true, vec![Action::Request(ApiRequest::mark_read(id))]))
        }
        ApiResponse::MarkedRead { id } => {
            tracing::debug!(id, "email marked read");
            Ok((false, vec![]))
        }
        ApiResponse::ArchiveUpdated { id, archived } => {
            tracing::debug!(id, archived, "archive flag stored");
            if !state.mail.is_viewing_email(*id) {
                return Ok((false, vec![]));
            }
            state.mail.show_mailbox(Mailbox::Inbox);
            Ok((true, vec![Action::Request(ApiRequest::load_mailbox(Mailbox::Inbox))]))
        }
        ApiResponse::EmailSent { message } => {
            tracing::debug!(%message, "email sent");
            state.mail.draft = ComposeDraft::default();
            state.mail.show_mailbox(Mailbox::Sent);
            Ok((
                true,
                vec![
                    Action::Request(ApiRequest::load_mailbox(Mailbox::Sent)),
                    Action::Alert(message.clone()),
                ],
            ))
        }
        ApiResponse::LikesLoaded { post_id, summary } => {
            let Some(post) = state.feed.post_mut(*post_id) else {
                return Ok((false, vec![]));
            };
            post.likes = Some(summary.clone());
            Ok((true, vec![]))
        }
        ApiResponse::LikeToggled { post_id, liked } => {
            let Some(post) = state.feed.post_mut(*post_id) else {
                return Ok((false, vec![]));
            };
            post.apply_like(*liked);
            Ok((true, vec![]))
        }
        ApiResponse::PostLoaded { post_id, record } => {
            if state.feed.edit_lock != Some(*post_id) {
                tracing::debug!(post_id, "dropping post fields for a released editor");
                return Ok((false, vec![]));
            }
            let Some(post) = state.feed.post_mut(*post_id).filter(|post| post.mode == PostMode::Loading) else {
                return Ok((false, vec![]));
            };
            post.draft = record.fields();
            post.mode = PostMode::Editing;
            Ok((true, vec![]))
        }
        ApiResponse::PostEdited { post_id, record } => {
            if let Some(post) = state.feed.post_mut(*post_id) {
                post.apply_record(record);
                post.mode = PostMode::Display;
            }
            state.feed.release_lock(*post_id);
            Ok((true, vec![]))
        }
        ApiResponse::FollowLoaded { username, summary } => {
            let Some(profile) = state.feed.profile_mut(username) else {
                return Ok((false, vec![]));
            };
            profile.apply_summary(summary);
            Ok((true, vec![]))
        }
        ApiResponse::FollowToggled {
            username,
            is_following,
        } => {
            let Some(profile) = state.feed.profile_mut(username) else {
                return Ok((false, vec![]));
            };
            profile.apply_toggle(*is_following);
            Ok((true, vec![]))
        }
        ApiResponse::Failed {
            request,
            message,
            application,
        } => {
            let text = failure_text(message, *application);
            Ok(handle_failure(state, request, &text))
        }
    }
}

/// Text shown for a failure.
///
/// The backend's own message is shown verbatim; failures the backend did not
/// explain (no answer, bad status, malformed body) get [`UNREACHABLE_PREFIX`].
fn failure_text(message: &str, application: bool) -> String {
    if application {
        message.to_string()
    } else {
        format!("{UNREACHABLE_PREFIX}{message}")
    }
}

fn handle_failure(state: &mut AppState, request: &ApiRequest, message: &str) -> (bool, Vec<Action>) {
    match request {
        ApiRequest::LoadMailbox { mailbox, .. } => {
            if !state.mail.is_viewing_mailbox(*mailbox) {
                return (false, vec![]);
            }
            state.mail.loading = false;
            state.mail.status = Some(message.to_string());
            (true, vec![])
        }
        ApiRequest::LoadEmail { id, .. } | ApiRequest::SetArchived { id, .. } => {
            if !state.mail.is_viewing_email(*id) {
                return (false, vec![]);
            }
            state.mail.status = Some(message.to_string());
            (true, vec![])
        }
        ApiRequest::MarkRead { id, .. } => {
            tracing::warn!(id, error = message, "mark read failed");
            (false, vec![])
        }
        ApiRequest::SendEmail { .. } => {
            state.mail.status = Some(message.to_string());
            (true, vec![Action::Alert(message.to_string())])
        }
        ApiRequest::LoadLikes { post_id, .. } => {
            tracing::warn!(post_id, error = message, "like state unavailable");
            (false, vec![])
        }
        ApiRequest::LoadFollow { username, .. } => {
            tracing::warn!(%username, error = message, "follow state unavailable");
            (false, vec![])
        }
        ApiRequest::ToggleLike { .. } | ApiRequest::ToggleFollow { .. } => {
            (false, vec![Action::Alert(message.to_string())])
        }
        ApiRequest::LoadPost { post_id, .. } | ApiRequest::SubmitPostEdit { post_id, .. } => {
            if let Some(post) = state.feed.post_mut(*post_id) {
                if let PostMode::Saving { previous } = std::mem::replace(&mut post.mode, PostMode::Display) {
                    post.show_fields(previous);
                }
            }
            state.feed.release_lock(*post_id);
            (true, vec![Action::Alert(message.to_string())])
        }
    }
}

/// Short name used in span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::LoadMailbox(_) => "load_mailbox",
        Event::OpenEmail(_) => "open_email",
        Event::Reply => "reply",
        Event::ToggleArchive => "toggle_archive",
        Event::Compose => "compose",
        Event::SetRecipients(_) => "set_recipients",
        Event::SetSubject(_) => "set_subject",
        Event::SetBody(_) => "set_body",
        Event::SendEmail => "send_email",
        Event::FeedLoaded(_) => "feed_loaded",
        Event::ToggleLike { .. } => "toggle_like",
        Event::OpenEditor { .. } => "open_editor",
        Event::SetEditTitle(_) => "set_edit_title",
        Event::SetEditContents(_) => "set_edit_contents",
        Event::SubmitEdit => "submit_edit",
        Event::ToggleFollow => "toggle_follow",
        Event::Response(response) => match response {
            ApiResponse::Failed { .. } => "response_failed",
            _ => "response",
        },
    }
}
