//! Per-invocation settings read from the environment.
//!
//! The launcher passes workflow configuration as environment variables.
//! They are read once, at startup, into a [`Settings`] value; nothing else
//! in the crate touches the environment for configuration.
//!
//! | variable                | meaning                      | default      |
//! |-------------------------|------------------------------|--------------|
//! | `alfred_workflow_cache` | cache root directory         | caching off  |
//! | `scope`                 | scope override               | unset        |
//! | `DEFAULT_WORKSPACE`     | default window scope         | `focused`    |
//! | `ENABLE_NOTIFICATIONS`  | post a notification on run   | `true`       |

use crate::record::Scope;
use std::path::PathBuf;

pub const CACHE_DIR_VAR: &str = "alfred_workflow_cache";
pub const SCOPE_VAR: &str = "scope";
pub const DEFAULT_SCOPE_VAR: &str = "DEFAULT_WORKSPACE";
pub const NOTIFICATIONS_VAR: &str = "ENABLE_NOTIFICATIONS";

/// Invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory for the snapshot cache and config preview.
    pub cache_dir: Option<PathBuf>,
    /// Value of the scope override variable, if set.
    pub scope_override: Option<String>,
    /// Value of the default scope variable, if set.
    pub default_scope: Option<String>,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_dir: None,
            scope_override: None,
            default_scope: None,
            notifications: true,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            cache_dir: non_empty(CACHE_DIR_VAR).map(PathBuf::from),
            scope_override: non_empty(SCOPE_VAR),
            default_scope: non_empty(DEFAULT_SCOPE_VAR),
            notifications: lookup(NOTIFICATIONS_VAR)
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Resolve the window scope: explicit argument, then the override
    /// variable, then the default variable.  Invalid values mean
    /// [`Scope::Focused`].
    pub fn scope(&self, explicit: Option<&str>) -> Scope {
        Scope::resolve([
            explicit,
            self.scope_override.as_deref(),
            self.default_scope.as_deref(),
        ])
    }

    /// Directory for scratch files such as the config preview.
    pub fn scratch_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
    }
}

/// `1`, `true`, `yes` and `on` (any case) enable a flag.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
