//! Request worker executing [`ApiRequest`]s against a [`Backend`].
//!
//! The worker is the only component that performs I/O. It turns every request into
//! exactly one [`ApiResponse`]; failures never escape as `Err` but come back as
//! [`ApiResponse::Failed`] so the handler can route them to the right place.

use crate::api::Backend;
use crate::domain::error::{MailfeedError, Result};
use crate::domain::EmailPatch;
use crate::worker::{ApiRequest, ApiResponse};

/// Executes backend requests on behalf of the event handler.
#[derive(Debug)]
pub struct RequestWorker<B: Backend> {
    backend: B,
}

impl<B: Backend> RequestWorker<B> {
    /// Creates a worker over `backend`.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Maps a backend result onto a response with consistent logging.
    fn handle_result<T, F>(request: &ApiRequest, result: Result<T>, on_success: F) -> ApiResponse
    where
        F: FnOnce(T) -> ApiResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(request = request.name(), "request succeeded");
                on_success(value)
            }
            Err(e) => {
                if let MailfeedError::Application(message) = &e {
                    tracing::debug!(request = request.name(), error = %message, "backend rejected request");
                } else {
                    tracing::warn!(request = request.name(), error = %e, "request failed");
                }
                ApiResponse::Failed {
                    request: Box::new(request.clone()),
                    message: e.to_string(),
                    application: e.is_application(),
                }
            }
        }
    }

    /// Re-attaches the trace context captured when the request was built.
    ///
    /// Returns a guard that must be held while the request executes.
    fn attach_parent_trace_context(request: &ApiRequest) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = request.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Executes `request` and returns its response.
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let _context_guard = Self::attach_parent_trace_context(request);
        let _span = tracing::debug_span!("worker_request", request = request.name()).entered();

        match request {
            ApiRequest::LoadMailbox { mailbox, .. } => {
                let mailbox = *mailbox;
                Self::handle_result(request, self.backend.list_mailbox(mailbox), |emails| {
                    tracing::debug!(mailbox = %mailbox, count = emails.len(), "mailbox listed");
                    ApiResponse::MailboxLoaded { mailbox, emails }
                })
            }
            ApiRequest::LoadEmail { id, .. } => {
                Self::handle_result(request, self.backend.get_email(*id), |email| {
                    ApiResponse::EmailLoaded { email }
                })
            }
            ApiRequest::MarkRead { id, .. } => {
                let id = *id;
                Self::handle_result(
                    request,
                    self.backend.update_email(id, EmailPatch::mark_read()),
                    |()| ApiResponse::MarkedRead { id },
                )
            }
            ApiRequest::SetArchived { id, archived, .. } => {
                let (id, archived) = (*id, *archived);
                Self::handle_result(
                    request,
                    self.backend.update_email(id, EmailPatch::archived(archived)),
                    |()| ApiResponse::ArchiveUpdated { id, archived },
                )
            }
            ApiRequest::SendEmail { draft, .. } => {
                Self::handle_result(request, self.backend.send_email(draft), |receipt| {
                    ApiResponse::EmailSent {
                        message: receipt.message,
                    }
                })
            }
            ApiRequest::LoadLikes { post_id, .. } => {
                let post_id = *post_id;
                Self::handle_result(request, self.backend.get_likes(post_id), |summary| {
                    ApiResponse::LikesLoaded { post_id, summary }
                })
            }
            ApiRequest::ToggleLike { post_id, .. } => {
                let post_id = *post_id;
                Self::handle_result(request, self.backend.toggle_like(post_id), |toggle| {
                    ApiResponse::LikeToggled {
                        post_id,
                        liked: toggle.post_liked,
                    }
                })
            }
            ApiRequest::LoadPost { post_id, .. } => {
                let post_id = *post_id;
                Self::handle_result(request, self.backend.get_post(post_id), |record| {
                    ApiResponse::PostLoaded { post_id, record }
                })
            }
            ApiRequest::SubmitPostEdit {
                post_id, fields, ..
            } => {
                let post_id = *post_id;
                Self::handle_result(request, self.backend.edit_post(post_id, fields), |record| {
                    ApiResponse::PostEdited { post_id, record }
                })
            }
            ApiRequest::LoadFollow { username, .. } => {
                Self::handle_result(request, self.backend.get_follow(username), |summary| {
                    ApiResponse::FollowLoaded {
                        username: username.clone(),
                        summary,
                    }
                })
            }
            ApiRequest::ToggleFollow { username, .. } => {
                Self::handle_result(request, self.backend.toggle_follow(username), |toggle| {
                    ApiResponse::FollowToggled {
                        username: username.clone(),
                        is_following: toggle.is_following,
                    }
                })
            }
        }
    }
}
