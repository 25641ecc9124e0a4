//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. Actions
//! are executed in order, so a navigation request queued before an alert is
//! issued before the alert is raised.
//!
//! # Example
//!
//! ```rust
//! use mailfeed::app::Action;
//! use mailfeed::domain::Mailbox;
//! use mailfeed::worker::ApiRequest;
//!
//! let actions = vec![
//!     Action::Request(ApiRequest::load_mailbox(Mailbox::Sent)),
//!     Action::Alert("Email sent successfully.".to_string()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::ApiRequest;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a request to the request worker.
    ///
    /// Its response re-enters the handler as [`Event::Response`](crate::app::Event::Response).
    Request(ApiRequest),

    /// Shows a blocking message to the user.
    Alert(String),
}
