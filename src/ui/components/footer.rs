//! Footer component renderer.

use super::push_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Appends the command hints, centered and dimmed.
///
/// Hints wider than the terminal are truncated.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    push_centered(out, &footer.keybindings, &style, cols);
}
