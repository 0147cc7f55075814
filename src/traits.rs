//! Core traits that decouple aerolaunch from AeroSpace and macOS.
//!
//! Every concrete backend (the `aerospace` CLI, Spotlight, `osascript`, a
//! test harness, …) implements one of these traits.  The
//! [`Launcher`](crate::launcher::Launcher) and the
//! [`SnapshotFetcher`](crate::snapshot::SnapshotFetcher) only depend on these
//! abstractions.

use crate::record::{Scope, WindowRecord, WorkspaceRecord};

/// Abstraction over a tiling window manager that can enumerate its state,
/// focus windows and change layouts.
///
/// An implementation might shell out to the `aerospace` CLI, or it might be
/// a canned stub used in tests.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return every window in `scope`, in the window manager's order.
    fn list_windows(&self, scope: Scope) -> Result<Vec<WindowRecord>, Self::Error>;

    /// Return the focused window including its layout attributes, or `None`
    /// if nothing has focus.
    fn focused_window(&self) -> Result<Option<WindowRecord>, Self::Error>;

    /// Return every workspace across all monitors.
    fn list_workspaces(&self) -> Result<Vec<WorkspaceRecord>, Self::Error>;

    /// Focus the window with the given id.
    fn focus_window(&self, window_id: &str) -> Result<(), Self::Error>;

    /// Apply a layout (`h_tiles`, `floating`, …) to the focused window.
    fn set_layout(&self, layout: &str) -> Result<(), Self::Error>;

    /// Return the path of the user configuration file exactly as the window
    /// manager reports it (possibly `~`-prefixed).
    fn config_path(&self) -> Result<String, Self::Error>;
}

/// Resolves an application bundle identifier to a filesystem path.
///
/// Lookups are infallible from the caller's point of view: any failure is
/// a negative resolution.
pub trait AppLocator {
    fn locate(&self, bundle_id: &str) -> Option<String>;
}

/// Executes an automation script and returns its textual result.
pub trait ScriptRunner {
    /// The error type produced by this runner.
    type Error: std::error::Error + Send + 'static;

    /// Run `script` to completion and return its trimmed output.
    fn run(&self, script: &str) -> Result<String, Self::Error>;
}


#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;

    #[test]
    fn mock_wm_records_list_calls() {
        let wm = MockWm::with_windows(vec![WindowRecord::new("Finder", "", 1)]);
        let windows = wm.list_windows(Scope::All).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(*wm.list_calls.borrow(), vec![Scope::All]);
    }

    #[test]
    fn mock_wm_failure_carries_message() {
        let wm = MockWm::failing("not running");
        let err = wm.list_workspaces().unwrap_err();
        assert_eq!(err.to_string(), "not running");
    }

    #[test]
    fn mock_locator_returns_known_paths() {
        let loc = MockLocator::with(&[("com.apple.Safari", "/Applications/Safari.app")]);
        assert_eq!(
            loc.locate("com.apple.Safari").as_deref(),
            Some("/Applications/Safari.app")
        );
        assert_eq!(loc.locate("org.unknown"), None);
        assert_eq!(loc.lookups.borrow().len(), 2);
    }
}
