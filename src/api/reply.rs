//! Response decoding shared by every backend call.
//!
//! The backend signals application failures by replying with a JSON object that
//! carries an `error` field, sometimes with a 2xx status and sometimes without.
//! [`decode_reply`] applies one rule set to all calls:
//!
//! 1. A JSON object with an `error` field is an application error, whatever the status.
//! 2. Any other non-2xx status is a status error.
//! 3. A 2xx body that is not the expected JSON shape is a decode error.

use crate::domain::error::{MailfeedError, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value as JsonValue;

/// Decodes a response body into `T`, classifying failures.
///
/// An empty 2xx body decodes as JSON `null`, so `T = ()` or [`IgnoredAny`]
/// accept `204 No Content` replies.
///
/// # Errors
///
/// Returns [`MailfeedError::Application`], [`MailfeedError::Status`] or
/// [`MailfeedError::Decode`] according to the rules above.
///
/// # Example
///
/// ```
/// use mailfeed::api::decode_reply;
/// use mailfeed::domain::LikeToggle;
///
/// let toggle: LikeToggle = decode_reply("posts/like/7", 200, r#"{"post_liked":true}"#).unwrap();
/// assert!(toggle.post_liked);
///
/// let err = decode_reply::<LikeToggle>("posts/like/7", 200, r#"{"error":"You must log in to like a post!"}"#)
///     .unwrap_err();
/// assert!(err.is_application());
/// ```
pub fn decode_reply<T: DeserializeOwned>(endpoint: &str, status: u16, body: &str) -> Result<T> {
    let success = (200..300).contains(&status);
    let trimmed = body.trim();

    let value = if trimmed.is_empty() {
        JsonValue::Null
    } else {
        match serde_json::from_str::<JsonValue>(trimmed) {
            Ok(value) => value,
            Err(e) if success => {
                return Err(MailfeedError::Decode {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                });
            }
            Err(_) => return Err(status_error(endpoint, status)),
        }
    };

    if let Some(message) = application_error(&value) {
        tracing::debug!(endpoint = %endpoint, status, error = %message, "backend reported an error");
        return Err(MailfeedError::Application(message));
    }

    if !success {
        return Err(status_error(endpoint, status));
    }

    serde_json::from_value(value).map_err(|e| MailfeedError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

/// Decodes a reply whose body carries nothing the caller needs.
///
/// # Errors
///
/// Same classification as [`decode_reply`].
pub fn decode_ack(endpoint: &str, status: u16, body: &str) -> Result<()> {
    decode_reply::<IgnoredAny>(endpoint, status, body).map(|_| ())
}

fn application_error(value: &JsonValue) -> Option<String> {
    let error = value.as_object()?.get("error")?;
    match error {
        JsonValue::Null => None,
        JsonValue::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

fn status_error(endpoint: &str, status: u16) -> MailfeedError {
    MailfeedError::Status {
        status,
        endpoint: endpoint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, FollowToggle};

    #[test]
    fn error_bodies_win_over_status() {
        let err = decode_reply::<Vec<Email>>("emails/spam", 400, r#"{"error": "Invalid mailbox."}"#)
            .unwrap_err();
        assert!(matches!(err, MailfeedError::Application(ref m) if m == "Invalid mailbox."));
    }

    #[test]
    fn non_json_failures_are_status_errors() {
        let err = decode_reply::<FollowToggle>("profile/ann/follow", 500, "<h1>Server Error</h1>")
            .unwrap_err();
        assert!(matches!(err, MailfeedError::Status { status: 500, .. }));
    }

    #[test]
    fn non_json_success_is_a_decode_error() {
        let err = decode_reply::<FollowToggle>("profile/ann/follow", 200, "<html>").unwrap_err();
        assert!(matches!(err, MailfeedError::Decode { .. }));
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = decode_reply::<Vec<Email>>("emails/inbox", 200, r#"{"emails": []}"#).unwrap_err();
        assert!(matches!(err, MailfeedError::Decode { ref endpoint, .. } if endpoint == "emails/inbox"));
    }

    #[test]
    fn empty_no_content_is_an_ack() {
        assert!(decode_ack("emails/1", 204, "").is_ok());
        assert!(decode_ack("emails/1", 404, "").is_err());
    }

    #[test]
    fn null_error_field_is_not_an_error() {
        let toggle: FollowToggle =
            decode_reply("profile/ann/follow", 200, r#"{"is_following":true,"error":null}"#).unwrap();
        assert!(toggle.is_following);
    }
}
