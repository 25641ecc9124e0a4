//! Compose form renderer.

use super::{button, push_block, push_line, render_border};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ComposeView;

pub fn render_compose(out: &mut String, view: &ComposeView, theme: &Theme, cols: usize) {
    let colors = &theme.colors;
    out.push_str(Theme::bold());
    push_line(out, "New Email", &colors.text_normal, cols);
    push_line(out, &format!("To: {}", view.recipients), &colors.text_normal, cols);
    push_line(out, &format!("Subject: {}", view.subject), &colors.text_normal, cols);
    render_border(out, &colors.border, cols);
    push_block(out, &view.body, &colors.text_normal, cols);
    out.push_str(&button("Send", true, theme));
    out.push('\n');
}
