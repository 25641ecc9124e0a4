//! mailfeed: view controller for a mail client and a social feed backed by a
//! JSON REST server.
//!
//! Two small CRUD front ends share one architecture:
//! - **mail**: inbox / sent / archive lists, email detail, compose, reply and archive toggle
//! - **network**: per-post like toggle, inline post editor and profile follow toggle
//!
//! Every user action maps onto one REST call and a view update. The server owns
//! all data; nothing is cached and every view re-fetches when opened.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Commands in, screens out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Event/action loop
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ App Layer     │   │ Worker Layer  │   │ UI Layer      │
//! │ (app/)        │   │ (worker/)     │   │ (ui/)         │
//! │ - Events      │   │ - Requests    │   │ - View models │
//! │ - State       │   │ - Responses   │   │ - Components  │
//! │ - Actions     │   │ - Trace ctx   │   │ - Themes      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                             │
//! ┌─────────────────────────────────────────────────────┐
//! │  API Layer (api/)                                   │
//! │  - Backend trait, endpoints, reply decoding         │
//! │  - reqwest HTTP implementation                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Infrastructure, Observability    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Backend trait and its HTTP implementation
//! - [`domain`]: Emails, posts, follow state and errors
//! - [`infrastructure`]: Data directory and path helpers
//! - [`runtime`]: Drives events, requests and responses to completion
//! - [`worker`]: Request/response messages and the request worker
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! The binary takes `key=value` arguments:
//!
//! ```text
//! mailfeed base_url=http://127.0.0.1:8000 app=network page=~/feed.json \
//!          session_cookie="sessionid=abc" theme=midnight trace_level=debug
//! ```
//!
//! # Example
//!
//! ```rust
//! use mailfeed::{handle_event, initialize, Config, Event};
//! use mailfeed::domain::Mailbox;
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::LoadMailbox(Mailbox::Inbox))?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), mailfeed::MailfeedError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppKind, AppState, Event};
pub use domain::{MailfeedError, Result};
pub use ui::Theme;

use crate::domain::{FeedPage, Mailbox};
use crate::infrastructure::expand_tilde;
use std::collections::BTreeMap;

/// Request timeout used when `timeout_secs` is missing or invalid.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Front end configuration parsed from `key=value` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the web application, e.g. `http://127.0.0.1:8000`.
    ///
    /// Required; endpoint paths are joined onto it.
    pub base_url: Option<String>,

    /// Which front end to run. Default: mail.
    pub app: AppKind,

    /// Path to the JSON page seed for the network front end.
    ///
    /// Without it the feed starts empty.
    pub page: Option<String>,

    /// Raw `Cookie` header value forwarded on every request.
    pub session_cookie: Option<String>,

    /// Per-request timeout in seconds. Default: 10.
    pub timeout_secs: u64,

    /// Built-in theme name (`classic`, `midnight`). Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter (`trace`, `debug`, `info`, `warn`, `error`). Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            app: AppKind::Mail,
            page: None,
            session_cookie: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a `key=value` map.
    ///
    /// # Parsing Rules
    ///
    /// - Empty values count as missing
    /// - `app`: `mail` or `network` (falls back to `mail` on anything else)
    /// - `timeout_secs`: positive integer (falls back to 10 on parse error or 0)
    /// - `theme` fills [`Config::theme_name`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mailfeed::{AppKind, Config};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://localhost:8000".to_string());
    /// map.insert("app".to_string(), "network".to_string());
    /// map.insert("timeout_secs".to_string(), "abc".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.app, AppKind::Network);
    /// assert_eq!(config.timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let app = get("app")
            .and_then(|app| app.parse::<AppKind>().ok())
            .unwrap_or_default();

        let timeout_secs = get("timeout_secs")
            .and_then(|secs| secs.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url: get("base_url"),
            app,
            page: get("page"),
            session_cookie: get("session_cookie"),
            timeout_secs,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Checks the settings the front end cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`MailfeedError::Config`] if `base_url` is missing or is not an
    /// `http(s)` URL.
    pub fn validate(&self) -> Result<()> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(MailfeedError::Config("base_url is required".to_string()));
        };
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MailfeedError::Config(format!(
                "base_url must start with http:// or https://, got {base_url}"
            )));
        }
        Ok(())
    }
}

/// Creates the application state for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the default; a theme
/// that fails to load falls back to the default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(app = ?config.app, "initializing mailfeed");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.app, theme)
}

/// The event that opens the configured front end.
///
/// The mail client opens the inbox; the network client loads its page seed.
///
/// # Errors
///
/// Returns an error if the configured page seed cannot be read or parsed.
pub fn startup_event(config: &Config) -> Result<Event> {
    match config.app {
        AppKind::Mail => Ok(Event::LoadMailbox(Mailbox::Inbox)),
        AppKind::Network => {
            let page = match &config.page {
                Some(path) => FeedPage::from_file(expand_tilde(path))?,
                None => FeedPage::default(),
            };
            Ok(Event::FeedLoaded(page))
        }
    }
}
