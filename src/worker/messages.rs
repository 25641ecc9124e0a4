//! Request and response messages exchanged with the request worker.
//!
//! The event handler never calls the backend itself. It emits [`ApiRequest`]
//! values, the worker executes them, and every request comes back as exactly one
//! [`ApiResponse`]. Requests carry the tracing context of the handler span that
//! issued them so the HTTP spans nest under the user event that caused them.

use crate::domain::{
    ComposeDraft, Email, EmailId, FollowSummary, LikeSummary, Mailbox, PostFields, PostId,
    PostRecord,
};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for linking request spans to the issuing event.
///
/// Captures the current trace and span IDs from OpenTelemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span is not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context to a request.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

api_request_builders! {
    load_mailbox(LoadMailbox { mailbox: Mailbox }),
    load_email(LoadEmail { id: EmailId }),
    mark_read(MarkRead { id: EmailId }),
    set_archived(SetArchived { id: EmailId, archived: bool }),
    send_email(SendEmail { draft: ComposeDraft }),
    load_likes(LoadLikes { post_id: PostId }),
    toggle_like(ToggleLike { post_id: PostId }),
    load_post(LoadPost { post_id: PostId }),
    submit_post_edit(SubmitPostEdit { post_id: PostId, fields: PostFields }),
    load_follow(LoadFollow { username: String }),
    toggle_follow(ToggleFollow { username: String }),
}

/// Backend calls requested by the event handler.
///
/// One variant per REST call. All variants carry an optional trace context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiRequest {
    /// `GET emails/{mailbox}`
    LoadMailbox {
        mailbox: Mailbox,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `GET emails/{id}`
    LoadEmail {
        id: EmailId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `PUT emails/{id}` with `{"read": true}`.
    MarkRead {
        id: EmailId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `PUT emails/{id}` with `{"archived": archived}`.
    SetArchived {
        id: EmailId,
        archived: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `POST emails`
    SendEmail {
        draft: ComposeDraft,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `GET posts/like/{id}`
    LoadLikes {
        post_id: PostId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `PUT posts/like/{id}`
    ToggleLike {
        post_id: PostId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `GET posts/edit/{id}`
    LoadPost {
        post_id: PostId,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `POST posts/edit/{id}`
    SubmitPostEdit {
        post_id: PostId,
        fields: PostFields,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `GET profile/{username}/follow`
    LoadFollow {
        username: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// `PUT profile/{username}/follow`
    ToggleFollow {
        username: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl ApiRequest {
    /// Short name used in logs and span fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadMailbox { .. } => "load_mailbox",
            Self::LoadEmail { .. } => "load_email",
            Self::MarkRead { .. } => "mark_read",
            Self::SetArchived { .. } => "set_archived",
            Self::SendEmail { .. } => "send_email",
            Self::LoadLikes { .. } => "load_likes",
            Self::ToggleLike { .. } => "toggle_like",
            Self::LoadPost { .. } => "load_post",
            Self::SubmitPostEdit { .. } => "submit_post_edit",
            Self::LoadFollow { .. } => "load_follow",
            Self::ToggleFollow { .. } => "toggle_follow",
        }
    }

    /// Trace context captured when the request was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadMailbox { trace_context, .. }
            | Self::LoadEmail { trace_context, .. }
            | Self::MarkRead { trace_context, .. }
            | Self::SetArchived { trace_context, .. }
            | Self::SendEmail { trace_context, .. }
            | Self::LoadLikes { trace_context, .. }
            | Self::ToggleLike { trace_context, .. }
            | Self::LoadPost { trace_context, .. }
            | Self::SubmitPostEdit { trace_context, .. }
            | Self::LoadFollow { trace_context, .. }
            | Self::ToggleFollow { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Outcome of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiResponse {
    /// A mailbox list arrived.
    MailboxLoaded {
        mailbox: Mailbox,
        emails: Vec<Email>,
    },

    /// A single email arrived.
    EmailLoaded {
        email: Email,
    },

    /// The read receipt was stored.
    MarkedRead {
        id: EmailId,
    },

    /// The archived flag was stored.
    ArchiveUpdated {
        id: EmailId,
        archived: bool,
    },

    /// The backend accepted a composed email.
    EmailSent {
        message: String,
    },

    /// Like state of a post arrived.
    LikesLoaded {
        post_id: PostId,
        summary: LikeSummary,
    },

    /// The viewer's like was toggled.
    LikeToggled {
        post_id: PostId,
        liked: bool,
    },

    /// Editable fields of a post arrived.
    PostLoaded {
        post_id: PostId,
        record: PostRecord,
    },

    /// An edit was stored; `record` is the backend's copy.
    PostEdited {
        post_id: PostId,
        record: PostRecord,
    },

    /// Follow relation of a profile arrived.
    FollowLoaded {
        username: String,
        summary: FollowSummary,
    },

    /// The viewer's follow was toggled.
    FollowToggled {
        username: String,
        is_following: bool,
    },

    /// The request failed; `request` is the request that failed.
    Failed {
        request: Box<ApiRequest>,
        /// Human-readable message (the backend's own text for application errors).
        message: String,
        /// Whether the backend itself rejected the request.
        application: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_trace_context_empty_without_a_layer() {
        let request = ApiRequest::toggle_like(7);
        assert_eq!(
            request,
            ApiRequest::ToggleLike {
                post_id: 7,
                trace_context: None
            }
        );
        assert!(request.trace_context().is_none());
        assert_eq!(request.name(), "toggle_like");
    }

    #[test]
    fn requests_serialize_without_empty_trace_context() {
        let json = serde_json::to_string(&ApiRequest::load_mailbox(Mailbox::Sent)).unwrap();
        assert_eq!(json, r#"{"LoadMailbox":{"mailbox":"sent"}}"#);
    }
}
