//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system, supporting both built-in themes
//! and custom themes loaded from TOML files. It provides utilities for
//! converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `classic`: White read rows, light gray unread rows (default)
//! - `midnight`: Dark palette with muted row backgrounds
//!
//! # TOML Format
//!
//! Every color is optional in a custom theme; missing colors fall back to the
//! `classic` palette.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#1f2937"
//! read_bg = "#FFFFFF"
//! unread_bg = "#D3D3D3"
//! like_fg = "#dc2626"
//! ```
//!
//! # Example
//!
//! ```rust
//! use mailfeed::ui::theme::Theme;
//!
//! let theme = Theme::from_name("classic").unwrap();
//! assert_eq!(theme.colors.unread_bg, "#D3D3D3");
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{MailfeedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "classic";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    #[serde(default)]
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g., "#D3D3D3").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    pub header_bg: Option<String>,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, timestamps).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Status area text color.
    pub status_fg: String,

    /// Background of a read mailbox row.
    pub read_bg: String,
    /// Background of an unread mailbox row.
    pub unread_bg: String,
    /// Text color on mailbox rows.
    pub row_fg: String,

    /// Like glyph color.
    pub like_fg: String,

    /// Enabled button label color.
    pub button_fg: String,
    /// Disabled button label color.
    pub button_disabled_fg: String,

    /// Empty state message color.
    pub empty_state_fg: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            header_fg: "#1f2937".to_string(),
            header_bg: None,
            text_normal: "#e5e7eb".to_string(),
            text_dim: "#9ca3af".to_string(),
            border: "#6b7280".to_string(),
            status_fg: "#f59e0b".to_string(),
            read_bg: "#FFFFFF".to_string(),
            unread_bg: "#D3D3D3".to_string(),
            row_fg: "#111827".to_string(),
            like_fg: "#dc2626".to_string(),
            button_fg: "#2563eb".to_string(),
            button_disabled_fg: "#6b7280".to_string(),
            empty_state_fg: "#60a5fa".to_string(),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `classic`, `midnight`.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "classic" => include_str!("../../themes/classic.toml"),
            "midnight" => include_str!("../../themes/midnight.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MailfeedError::Theme`] if the file cannot be read or the TOML
    /// content cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MailfeedError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| MailfeedError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mailfeed::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#D3D3D3"), "\u{1b}[38;2;211;211;211m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `classic` theme.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["classic", "midnight"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn default_theme_uses_white_and_light_gray_rows() {
        let theme = Theme::default();
        assert_eq!(theme.name, "classic");
        assert_eq!(theme.colors.read_bg, "#FFFFFF");
        assert_eq!(theme.colors.unread_bg, "#D3D3D3");
    }

    #[test]
    fn custom_theme_file_falls_back_to_classic_colors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"mine\"\n\n[colors]\nunread_bg = \"#101010\"").unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.unread_bg, "#101010");
        assert_eq!(theme.colors.read_bg, "#FFFFFF");
    }

    #[test]
    fn unreadable_theme_file_is_a_theme_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Theme::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, MailfeedError::Theme(_)));
    }

    #[test]
    fn malformed_hex_renders_white() {
        assert_eq!(Theme::bg("nope"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#0a0B0c"), "\u{1b}[38;2;10;11;12m");
    }
}
