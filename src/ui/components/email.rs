//! Email detail renderer.

use super::{button, push_block, push_line, render_border};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmailView;

/// Appends the opened email, or a loading line while it is in flight.
pub fn render_email(out: &mut String, view: Option<&EmailView>, theme: &Theme, cols: usize) {
    let Some(view) = view else {
        push_line(out, "Loading...", &theme.colors.text_dim, cols);
        return;
    };

    let colors = &theme.colors;
    for (label, value) in [
        ("From", &view.sender),
        ("To", &view.recipients),
        ("Subject", &view.subject),
        ("Timestamp", &view.timestamp),
    ] {
        out.push_str(Theme::bold());
        push_line(out, &format!("{label}: {value}"), &colors.text_normal, cols);
    }

    out.push_str(&button("Reply", true, theme));
    out.push(' ');
    out.push_str(&button(&view.archive_label, true, theme));
    out.push('\n');

    render_border(out, &colors.border, cols);
    push_block(out, &view.body, &colors.text_normal, cols);
}
