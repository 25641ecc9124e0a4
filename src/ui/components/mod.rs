//! Composable UI component renderers.
//!
//! Each component appends its lines to an output buffer. Lines are padded to
//! the terminal width so background colors fill the row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Command hints
//! - [`status`]: Transient status area
//! - [`mailbox`]: Mailbox list with read/unread row backgrounds
//! - [`email`]: Email detail with reply and archive controls
//! - [`compose`]: Compose form
//! - [`feed`]: Posts with like, edit and follow controls
//! - [`empty`]: Empty state message

mod compose;
mod email;
mod empty;
mod feed;
mod footer;
mod header;
mod mailbox;
mod status;

pub use compose::render_compose;
pub use email::render_email;
pub use empty::render_empty_state;
pub use feed::render_feed;
pub use footer::render_footer;
pub use header::render_header;
pub use mailbox::render_mailbox;
pub use status::render_status;

use crate::ui::helpers::{fit, visual_len};
use crate::ui::theme::Theme;

/// Appends a horizontal separator line.
pub fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends `text` in `color`, cut or padded to `cols`.
fn push_line(out: &mut String, text: &str, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&fit(text, cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends `text` centered in `cols`.
fn push_centered(out: &mut String, text: &str, style: &str, cols: usize) {
    let len = visual_len(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    out.push_str(style);
    out.push_str(&" ".repeat(padding));
    out.push_str(&fit(text, cols.saturating_sub(padding)));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends a multi-line block, each line cut to `cols`.
fn push_block(out: &mut String, text: &str, color: &str, cols: usize) {
    for line in text.lines() {
        push_line(out, line, color, cols);
    }
}

/// Formats a clickable control label.
fn button(label: &str, enabled: bool, theme: &Theme) -> String {
    let color = if enabled {
        &theme.colors.button_fg
    } else {
        &theme.colors.button_disabled_fg
    };
    format!("{}[{label}]{}", Theme::fg(color), Theme::reset())
}
