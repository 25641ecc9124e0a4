//! Email records, mailboxes and compose drafts.
//!
//! Emails are owned by the backend; the client only reads them, patches the
//! `read` / `archived` flags and posts new drafts.

use crate::domain::error::{MailfeedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend identifier of an email.
pub type EmailId = u64;

/// Marker the reply prefill looks for before adding its own prefix.
const REPLY_MARKER: &str = "Re:";

/// One of the three fixed mailboxes the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mailbox {
    /// Received mail that has not been archived.
    Inbox,
    /// Mail sent by the current user.
    Sent,
    /// Received mail that has been archived.
    Archive,
}

impl Mailbox {
    /// Every mailbox, in navigation order.
    pub const ALL: [Self; 3] = [Self::Inbox, Self::Sent, Self::Archive];

    /// Path segment used by the list endpoint (`emails/{segment}`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Archive => "archive",
        }
    }

    /// Heading shown above the list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Sent => "Sent",
            Self::Archive => "Archive",
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mailbox {
    type Err = MailfeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(Self::Inbox),
            "sent" => Ok(Self::Sent),
            "archive" | "archived" => Ok(Self::Archive),
            other => Err(MailfeedError::Config(format!("unknown mailbox: {other}"))),
        }
    }
}

/// An email as serialized by the backend.
///
/// List payloads only guarantee the summary fields (`id`, `sender`, `subject`,
/// `timestamp`, `read`); the remaining fields default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub archived: bool,
}

/// Partial update sent with `PUT emails/{id}`.
///
/// Only the fields that are set are serialized, so a read receipt never touches
/// the archived flag and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl EmailPatch {
    /// Patch marking an email as read.
    #[must_use]
    pub const fn mark_read() -> Self {
        Self {
            read: Some(true),
            archived: None,
        }
    }

    /// Patch setting the archived flag.
    #[must_use]
    pub const fn archived(archived: bool) -> Self {
        Self {
            read: None,
            archived: Some(archived),
        }
    }
}

/// Contents of the compose form, posted as-is to `POST /emails`.
///
/// `recipients` stays the raw comma-separated string typed by the user; the
/// backend splits and validates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeDraft {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

impl ComposeDraft {
    /// Builds the prefilled reply to `email`.
    ///
    /// The subject gains a `"Re: "` prefix unless it already carries one, so
    /// replying to a reply never stacks prefixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailfeed::domain::{ComposeDraft, Email};
    ///
    /// let email = Email {
    ///     id: 3,
    ///     sender: "a@x.com".into(),
    ///     recipients: vec!["b@x.com".into()],
    ///     subject: "Re: Lunch".into(),
    ///     body: "Noon?".into(),
    ///     timestamp: "Jan 1 2021, 12:00 PM".into(),
    ///     read: true,
    ///     archived: false,
    /// };
    /// let draft = ComposeDraft::reply_to(&email);
    /// assert_eq!(draft.recipients, "a@x.com");
    /// assert_eq!(draft.subject, "Re: Lunch");
    /// assert_eq!(draft.body, "On Jan 1 2021, 12:00 PM, a@x.com wrote: Noon?");
    /// ```
    #[must_use]
    pub fn reply_to(email: &Email) -> Self {
        let subject = if email.subject.contains(REPLY_MARKER) {
            email.subject.clone()
        } else {
            format!("{REPLY_MARKER} {}", email.subject)
        };

        Self {
            recipients: email.sender.clone(),
            subject,
            body: format!("On {}, {} wrote: {}", email.timestamp, email.sender, email.body),
        }
    }
}

/// Confirmation returned by a successful send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(subject: &str) -> Email {
        Email {
            id: 1,
            sender: "a@x.com".into(),
            recipients: vec!["me@x.com".into()],
            subject: subject.into(),
            body: "hello".into(),
            timestamp: "t1".into(),
            read: false,
            archived: false,
        }
    }

    #[test]
    fn reply_prefixes_plain_subjects_once() {
        let first = ComposeDraft::reply_to(&email("Hi"));
        assert_eq!(first.subject, "Re: Hi");

        let mut echoed = email(&first.subject);
        echoed.sender = "me@x.com".into();
        let second = ComposeDraft::reply_to(&echoed);
        assert_eq!(second.subject, "Re: Hi");
        assert_eq!(second.recipients, "me@x.com");
    }

    #[test]
    fn reply_quotes_the_original() {
        let draft = ComposeDraft::reply_to(&email("Hi"));
        assert_eq!(draft.body, "On t1, a@x.com wrote: hello");
    }

    #[test]
    fn summary_rows_deserialize_without_detail_fields() {
        let row: Email = serde_json::from_str(
            r#"{"id":1,"sender":"a@x.com","subject":"Hi","timestamp":"t1","read":false}"#,
        )
        .unwrap();
        assert_eq!(row.id, 1);
        assert!(row.recipients.is_empty());
        assert!(!row.archived);
    }

    #[test]
    fn patches_only_serialize_the_flag_they_set() {
        assert_eq!(
            serde_json::to_string(&EmailPatch::mark_read()).unwrap(),
            r#"{"read":true}"#
        );
        assert_eq!(
            serde_json::to_string(&EmailPatch::archived(false)).unwrap(),
            r#"{"archived":false}"#
        );
    }

    #[test]
    fn mailbox_names_round_trip_through_from_str() {
        for mailbox in Mailbox::ALL {
            assert_eq!(mailbox.as_str().parse::<Mailbox>().unwrap(), mailbox);
        }
        assert!("spam".parse::<Mailbox>().is_err());
    }
}
