//! Status area renderer.

use super::push_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

pub fn render_status(out: &mut String, status: &StatusLine, theme: &Theme, cols: usize) {
    push_line(out, &format!("! {}", status.message), &theme.colors.status_fg, cols);
}
