//! Filesystem locations for configuration and data.
//!
//! Platform directories come from the `dirs` crate:
//!
//! | purpose | Linux                               | macOS                                       |
//! |---------|-------------------------------------|---------------------------------------------|
//! | data    | `~/.local/share/shelfmark`          | `~/Library/Application Support/shelfmark`   |
//! | config  | `~/.config/shelfmark/config.toml`   | `~/Library/Application Support/shelfmark/config.toml` |

use std::path::PathBuf;

const APP_DIR: &str = "shelfmark";

/// Returns the default data directory.
///
/// Falls back to `./.shelfmark` when the platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".shelfmark"), |dir| dir.join(APP_DIR))
}

/// Returns the default configuration file location, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use shelfmark::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/books"), home.join("books"));
        }
        assert_eq!(expand_tilde("~user/books"), PathBuf::from("~user/books"));
    }

    #[test]
    fn default_locations_end_in_app_dir() {
        assert!(default_data_dir().ends_with(APP_DIR) || default_data_dir().ends_with(".shelfmark"));
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("shelfmark/config.toml"));
        }
    }
}
