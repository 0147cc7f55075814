//! Loading the AeroSpace configuration file.
//!
//! The path comes from the window manager itself (`aerospace config
//! --config-path`), may start with `~`, and points at a TOML document.
//! Only the `mode.<name>.binding` tables are used by this crate, see
//! [`extract_shortcuts`](crate::shortcut::extract::extract_shortcuts).
//!
//! # Example
//!
//! ```toml
//! [mode.main.binding]
//! alt-h = "focus left"
//! alt-shift-minus = "resize smart -50"
//! alt-r = ["mode resize", "exec-and-forget sketchybar --trigger mode"]
//!
//! [mode.resize.binding]
//! h = "resize width -50"
//! ```

use crate::traits::WindowManager;
use log::debug;
use std::path::{Path, PathBuf};

/// Shown when the resolved config file does not exist.
pub const MISSING_CONFIG_MESSAGE: &str =
    "Config file does not exist. Please check the path in preferences.";

/// Where users are sent when AeroSpace cannot be reached.
pub const INSTALL_GUIDE_URL: &str = "https://nikitabobko.github.io/AeroSpace/guide#installation";

/// A parsed configuration document and the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub document: toml::Table,
}

/// Error from locating or parsing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The window manager could not tell us where the config lives.
    #[error("{0}")]
    Resolution(String),
    #[error("{}", MISSING_CONFIG_MESSAGE)]
    Missing(PathBuf),
    #[error("Failed to parse config: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    /// The resolved path, when resolution got that far.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Resolution(_) => None,
            ConfigError::Missing(path) | ConfigError::Parse { path, .. } => Some(path),
        }
    }
}

/// Expand a leading `~` or `~/` against `home`.  Other paths, including
/// `~user` forms, are returned unchanged.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

/// Ask the window manager for the config path and expand `~`.
pub fn resolve_config_path<W: WindowManager>(wm: &W) -> Result<PathBuf, ConfigError> {
    let raw = wm
        .config_path()
        .map_err(|e| ConfigError::Resolution(e.to_string()))?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Resolution(
            "Unable to resolve AeroSpace config path.".into(),
        ));
    }
    Ok(expand_home(raw, dirs::home_dir().as_deref()))
}

/// The parser's message with the 1-based line and column it points at.
fn parse_message(contents: &str, error: &toml::de::Error) -> String {
    let Some(span) = error.span() else {
        return error.message().to_string();
    };
    let before = contents.get(..span.start).unwrap_or(contents);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().unwrap_or("").chars().count() + 1;
    format!("{} (at line {}, column {})", error.message(), line, column)
}

/// Read and parse the TOML document at `path`.
pub fn load_from_path(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let document: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: parse_message(&contents, &e),
    })?;
    debug!("loaded config from {}", path.display());
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        document,
    })
}

/// Resolve, check and parse the window manager's configuration.
pub fn load_config<W: WindowManager>(wm: &W) -> Result<LoadedConfig, ConfigError> {
    let path = resolve_config_path(wm)?;
    load_from_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockWm;

    fn wm_with_path(path: &str) -> MockWm {
        MockWm {
            config_path: path.to_string(),
            ..MockWm::default()
        }
    }

    #[test]
    fn expand_home_variants() {
        let home = Path::new("/Users/me");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/Users/me"));
        assert_eq!(
            expand_home("~/.aerospace.toml", Some(home)),
            PathBuf::from("/Users/me/.aerospace.toml")
        );
        assert_eq!(expand_home("/etc/aerospace.toml", Some(home)), PathBuf::from("/etc/aerospace.toml"));
        assert_eq!(expand_home("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_home("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn resolution_failure_keeps_wm_message() {
        let wm = MockWm::failing("aerospace: command not found");
        let err = load_config(&wm).unwrap_err();
        assert!(matches!(err, ConfigError::Resolution(_)));
        assert_eq!(err.to_string(), "aerospace: command not found");
        assert!(err.path().is_none());
    }

    #[test]
    fn empty_path_is_a_resolution_error() {
        let err = load_config(&wm_with_path("  \n")).unwrap_err();
        assert_eq!(err.to_string(), "Unable to resolve AeroSpace config path.");
    }

    #[test]
    fn missing_file_has_fixed_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_config(&wm_with_path(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
        assert_eq!(err.to_string(), MISSING_CONFIG_MESSAGE);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerospace.toml");
        std::fs::write(&path, "[mode.main.binding\nalt-h = ").unwrap();
        let err = load_config(&wm_with_path(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse config: "));
    }

    #[test]
    fn parse_error_names_line_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerospace.toml");
        std::fs::write(&path, "gaps = 1\n[mode.main.binding]\nalt-h = = 'x'\n").unwrap();
        let err = load_config(&wm_with_path(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("(at line 3, column "), "{}", err);
    }

    #[test]
    fn valid_toml_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerospace.toml");
        std::fs::write(&path, "[mode.main.binding]\nalt-h = 'focus left'\n").unwrap();
        let cfg = load_config(&wm_with_path(path.to_str().unwrap())).unwrap();
        assert_eq!(cfg.path, path);
        assert!(cfg.document.contains_key("mode"));
    }
}
