//! Empty state component renderer.

use super::push_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends a centered message and, when present, a dimmed subtitle below it.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');
    push_centered(out, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    if !empty.subtitle.is_empty() {
        let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        push_centered(out, &empty.subtitle, &style, cols);
    }
    out.push('\n');
}
