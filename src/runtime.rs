//! Runtime driving the event → action → response loop.
//!
//! The runtime owns the [`AppState`] and the [`RequestWorker`]. One call to
//! [`Runtime::dispatch`] handles a user event to completion: every action the
//! handler returns is executed in order, every request's response is fed back
//! as [`Event::Response`], and the loop runs until no work is left. Alerts are
//! collected for the front end to show.
//!
//! # Example
//!
//! ```rust,no_run
//! use mailfeed::api::HttpBackend;
//! use mailfeed::app::{AppKind, AppState, Event};
//! use mailfeed::domain::Mailbox;
//! use mailfeed::runtime::Runtime;
//! use mailfeed::ui::Theme;
//!
//! let backend = HttpBackend::new("http://127.0.0.1:8000", None, 10)?;
//! let mut runtime = Runtime::new(AppState::new(AppKind::Mail, Theme::default()), backend);
//! runtime.dispatch(Event::LoadMailbox(Mailbox::Inbox))?;
//! print!("{}", runtime.render(80));
//! for alert in runtime.take_alerts() {
//!     println!("{alert}");
//! }
//! # Ok::<(), mailfeed::domain::MailfeedError>(())
//! ```

use crate::api::Backend;
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::worker::{ApiResponse, RequestWorker};
use std::collections::VecDeque;

/// Owns the application state and executes the handler's actions.
#[derive(Debug)]
pub struct Runtime<B: Backend> {
    state: AppState,
    worker: RequestWorker<B>,
    alerts: Vec<String>,
}

impl<B: Backend> Runtime<B> {
    #[must_use]
    pub const fn new(state: AppState, backend: B) -> Self {
        Self {
            state,
            worker: RequestWorker::new(backend),
            alerts: Vec::new(),
        }
    }

    /// Current application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Handles `event` and everything it causes.
    ///
    /// Events are processed one at a time in FIFO order; responses are queued
    /// behind the events already waiting.
    ///
    /// # Returns
    ///
    /// Whether any processed event changed the view.
    ///
    /// # Errors
    ///
    /// Propagates handler errors; events still queued are dropped.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let span = tracing::debug_span!("dispatch");
        let _guard = span.enter();

        let mut queue = VecDeque::from([event]);
        let mut should_render = false;

        while let Some(event) = queue.pop_front() {
            let (render, actions) = handle_event(&mut self.state, &event)?;
            should_render |= render;

            for action in actions {
                if let Some(response) = self.execute_action(action) {
                    queue.push_back(Event::Response(response));
                }
            }
        }

        Ok(should_render)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> Option<ApiResponse> {
        match action {
            Action::Request(request) => Some(self.worker.handle(&request)),
            Action::Alert(message) => {
                tracing::info!(%message, "alert raised");
                self.alerts.push(message);
                None
            }
        }
    }

    /// Drains the alerts raised since the last call, oldest first.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Renders the current state for a terminal `cols` wide.
    #[must_use]
    pub fn render(&self, cols: usize) -> String {
        crate::ui::render(&self.state, cols)
    }
}
