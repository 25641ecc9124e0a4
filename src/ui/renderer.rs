//! Top-level rendering coordinator.
//!
//! Rendering is a pure projection: `AppState` → `UIViewModel` → text. The
//! layout is always header, border, optional status line, the one visible
//! panel, border, footer.
//!
//! # Example
//!
//! ```rust
//! use mailfeed::app::{AppKind, AppState};
//! use mailfeed::ui::{render, Theme};
//!
//! let state = AppState::new(AppKind::Mail, Theme::default());
//! let screen = render(&state, 80);
//! assert!(screen.contains("Inbox"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PanelView, UIViewModel};

/// Renders `state` for a terminal `cols` wide.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, &state.theme, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    components::render_header(&mut out, &vm.header, theme, cols);
    components::render_border(&mut out, &theme.colors.border, cols);

    if let Some(status) = &vm.status {
        components::render_status(&mut out, status, theme, cols);
    }

    match &vm.body {
        PanelView::Mailbox(view) => components::render_mailbox(&mut out, view, theme, cols),
        PanelView::Email(view) => components::render_email(&mut out, view.as_ref(), theme, cols),
        PanelView::Compose(view) => components::render_compose(&mut out, view, theme, cols),
        PanelView::Feed(view) => components::render_feed(&mut out, view, theme, cols),
    }

    components::render_border(&mut out, &theme.colors.border, cols);
    components::render_footer(&mut out, &vm.footer, theme, cols);
    out
}
