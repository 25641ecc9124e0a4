//! Header component renderer.

use super::push_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the title bar, centered, bold and in the header colors.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let mut style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }
    push_centered(out, &header.title, &style, cols);
}
