//! Launcher entry points.
//!
//! [`Launcher`] owns the window manager (through a [`SnapshotFetcher`]), the
//! script runner and the invocation [`Settings`].  List entry points return
//! a [`ResultList`] and never fail: errors become a single non-actionable
//! row.  Actions return a [`LauncherError`] that the binary prints before
//! exiting non-zero.
//!
//! # Typical usage
//!
//! ```ignore
//! let mut launcher = Launcher::new(fetcher, Osascript, Settings::from_env());
//! println!("{}", launcher.windows("chr", None).to_json());
//! launcher.focus("42")?;
//! ```

pub mod layout;
pub mod shortcuts;
pub mod windows;
pub mod workspaces;

use crate::config;
use crate::fuzzy;
use crate::output::{Item, ResultList};
use crate::record::Scope;
use crate::settings::Settings;
use crate::shortcut::script;
use crate::snapshot::SnapshotFetcher;
use crate::traits::{AppLocator, ScriptRunner, WindowManager};
use log::{info, warn};

/// Title of the notification posted after a shortcut runs.
pub const NOTIFICATION_TITLE: &str = "AeroSpace";

/// Errors from action entry points.  Display is the bare diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    /// The window manager rejected the request.
    #[error("{0}")]
    WindowManager(String),
    /// The automation script failed.
    #[error("{0}")]
    Script(String),
}

/// Serves every launcher entry point against one backend.
pub struct Launcher<W: WindowManager, L: AppLocator, R: ScriptRunner> {
    fetcher: SnapshotFetcher<W, L>,
    runner: R,
    settings: Settings,
}

impl<W: WindowManager, L: AppLocator, R: ScriptRunner> Launcher<W, L, R> {
    pub fn new(fetcher: SnapshotFetcher<W, L>, runner: R, settings: Settings) -> Self {
        Self {
            fetcher,
            runner,
            settings,
        }
    }

    //  Lists

    /// Windows in the resolved scope, ranked by `query`.
    ///
    /// `scope` is an explicit override; `None` falls back to the settings.
    pub fn windows(&mut self, query: &str, scope: Option<&str>) -> ResultList {
        let scope = self.settings.scope(scope);
        let windows = match self.fetcher.get_snapshot(scope) {
            Ok(windows) => windows,
            Err(e) => return ResultList::single(Item::info(windows::LIST_ERROR_TITLE, e.to_string())),
        };
        let ranked = fuzzy::rank(query, windows);
        ResultList::new(windows::window_items(&ranked, scope))
    }

    /// Workspace overview, or the windows of one workspace.
    pub fn workspaces(&mut self, query: &str) -> ResultList {
        let windows = match self.fetcher.get_snapshot(Scope::All) {
            Ok(windows) => windows,
            Err(e) => return ResultList::single(Item::info(windows::LIST_ERROR_TITLE, e.to_string())),
        };
        let workspaces = match self.fetcher.wm().list_workspaces() {
            Ok(workspaces) => workspaces,
            Err(e) => {
                return ResultList::single(Item::info(
                    workspaces::WORKSPACE_LIST_ERROR_TITLE,
                    e.to_string(),
                ))
            }
        };
        ResultList::new(workspaces::overview_items(query, windows, workspaces))
    }

    /// Layout menu for the focused window.
    pub fn focused_window(&mut self, query: &str) -> ResultList {
        let mut window = match self.fetcher.wm().focused_window() {
            Ok(window) => window,
            Err(e) => return ResultList::single(Item::info(layout::FOCUSED_ERROR_TITLE, e.to_string())),
        };
        if let Some(w) = window.as_mut() {
            if let Some(bundle_id) = w.app_bundle_id.clone() {
                w.app_path = self.fetcher.resolve_app_path(&bundle_id);
            }
        }
        ResultList::new(layout::layout_items(window.as_ref(), query))
    }

    /// Keybindings from the config, filtered by `query`.
    pub fn shortcuts(&self, query: &str) -> ResultList {
        let config = config::load_config(self.fetcher.wm());
        ResultList::new(shortcuts::shortcut_items(config.as_ref(), query))
    }

    /// The entry that opens the config file.
    pub fn config_entry(&self) -> ResultList {
        let config = config::load_config(self.fetcher.wm());
        ResultList::single(shortcuts::config_item(
            config.as_ref(),
            &self.settings.scratch_dir(),
        ))
    }

    //  Actions

    /// Focus a window.  An empty id does nothing.
    pub fn focus(&self, window_id: &str) -> Result<(), LauncherError> {
        if window_id.is_empty() {
            return Ok(());
        }
        info!("focusing window {}", window_id);
        self.fetcher
            .wm()
            .focus_window(window_id)
            .map_err(|e| LauncherError::WindowManager(e.to_string()))
    }

    /// Apply a layout to the focused window.  An empty name does nothing.
    pub fn set_layout(&self, layout: &str) -> Result<(), LauncherError> {
        if layout.is_empty() {
            return Ok(());
        }
        info!("setting layout {}", layout);
        self.fetcher
            .wm()
            .set_layout(layout)
            .map_err(|e| LauncherError::WindowManager(e.to_string()))
    }

    /// Synthesize a shortcut and return the confirmation text.
    ///
    /// A non-empty confirmation is also posted as a notification when
    /// notifications are enabled.  An empty token does nothing.
    pub fn execute(&self, token: &str) -> Result<Option<String>, LauncherError> {
        if token.is_empty() {
            return Ok(None);
        }
        let output = script::execute_shortcut(&self.runner, token)
            .map_err(|e| LauncherError::Script(e.to_string()))?;
        if output.is_empty() {
            return Ok(None);
        }
        if self.settings.notifications {
            script::notify(&self.runner, NOTIFICATION_TITLE, &output);
        }
        Ok(Some(output))
    }
}

/// Open a URL or path in its default application.  Failures are logged,
/// never returned.
pub fn open(target: &str) {
    open_with(target, |t| ::open::that(t));
}

fn open_with<F>(target: &str, opener: F)
where
    F: FnOnce(&str) -> std::io::Result<()>,
{
    if target.is_empty() {
        return;
    }
    info!("opening {}", target);
    if let Err(e) = opener(target) {
        warn!("open {} failed: {}", target, e);
    }
}
