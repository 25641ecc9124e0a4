//! Path utilities for the data directory and user-supplied paths.

use std::env;
use std::path::PathBuf;

/// Directory name under the platform data directory.
const APP_DIR: &str = "mailfeed";

/// Returns the data directory for mailfeed output.
///
/// Resolution order:
///
/// 1. `$XDG_DATA_HOME/mailfeed`
/// 2. `$HOME/.local/share/mailfeed`
/// 3. `<temp dir>/mailfeed`
///
/// The directory is not created here; writers create it on first use.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        env::var_os("HOME").map(PathBuf::from),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".local").join("share")))
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use mailfeed::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_from(path, env::var("HOME").ok().as_deref())
}

fn expand_tilde_from(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_prefers_xdg() {
        let dir = data_dir_from(Some("/xdg".into()), Some("/home/ann".into()));
        assert_eq!(dir, PathBuf::from("/xdg/mailfeed"));
    }

    #[test]
    fn data_dir_ignores_relative_xdg() {
        let dir = data_dir_from(Some("relative".into()), Some("/home/ann".into()));
        assert_eq!(dir, PathBuf::from("/home/ann/.local/share/mailfeed"));
    }

    #[test]
    fn data_dir_falls_back_to_temp() {
        assert_eq!(data_dir_from(None, None), env::temp_dir().join("mailfeed"));
    }

    #[test]
    fn tilde_expands_only_at_the_start() {
        assert_eq!(expand_tilde_from("~/page.json", Some("/home/ann")), "/home/ann/page.json");
        assert_eq!(expand_tilde_from("~", Some("/home/ann")), "/home/ann");
        assert_eq!(expand_tilde_from("a/~/b", Some("/home/ann")), "a/~/b");
        assert_eq!(expand_tilde_from("~/x", None), "~/x");
    }
}
