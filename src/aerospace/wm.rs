//! [`WindowManager`] implementation backed by the `aerospace` CLI.
//!
//! Every query shells out to `aerospace … --json --format …` and parses the
//! resulting JSON array.  No connection or state is kept between calls.

use super::process::{self, CommandError, DEFAULT_TIMEOUT};
use crate::record::{Scope, WindowRecord, WorkspaceRecord};
use crate::traits::WindowManager;
use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Format variables requested for every window listing.
pub const WINDOWS_FORMAT: &str = "%{app-name} %{window-title} %{window-id} %{app-pid} \
     %{workspace} %{app-bundle-id} %{monitor-name}";

/// Extra layout variables requested for the focused window only.
pub const LAYOUT_FORMAT: &str = "%{window-layout} %{window-parent-container-layout} \
     %{workspace-root-container-layout} %{window-is-fullscreen}";

/// Format variables requested for the workspace listing.
pub const WORKSPACES_FORMAT: &str = "%{workspace} %{monitor-name} %{workspace-is-focused} \
     %{workspace-is-visible} %{workspace-root-container-layout}";

/// AeroSpace-backed window manager.
pub struct AerospaceWm {
    program: String,
    timeout: Duration,
}

/// Errors that can occur when talking to AeroSpace.
#[derive(Debug, thiserror::Error)]
pub enum AerospaceError {
    /// The CLI could not be run, timed out or exited non-zero.
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("failed to parse aerospace output: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unable to resolve AeroSpace config path.")]
    EmptyConfigPath,
}

impl Default for AerospaceWm {
    fn default() -> Self {
        Self::new()
    }
}

impl AerospaceWm {
    /// Create a handle that runs `aerospace` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("aerospace")
    }

    /// Create a handle that runs the given executable instead.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, AerospaceError> {
        Ok(process::run_checked(&self.program, args, self.timeout)?)
    }
}

//  Output parsing

/// Parse a JSON array of records.  Any other top-level value yields an
/// empty list.
pub fn parse_records<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, AerospaceError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        debug!("expected a JSON array from aerospace, got {}", value);
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

//  WindowManager implementation

impl WindowManager for AerospaceWm {
    type Error = AerospaceError;

    fn list_windows(&self, scope: Scope) -> Result<Vec<WindowRecord>, Self::Error> {
        let mut args = vec!["list-windows", "--json", "--format", WINDOWS_FORMAT];
        match scope {
            Scope::All => args.push("--all"),
            Scope::Focused => args.extend(["--workspace", "focused"]),
        }
        parse_records(&self.run(&args)?)
    }

    fn focused_window(&self) -> Result<Option<WindowRecord>, Self::Error> {
        let format = format!("{} {}", WINDOWS_FORMAT, LAYOUT_FORMAT);
        let output = self.run(&["list-windows", "--focused", "--json", "--format", format.as_str()])?;
        let windows: Vec<WindowRecord> = parse_records(&output)?;
        Ok(windows.into_iter().next())
    }

    fn list_workspaces(&self) -> Result<Vec<WorkspaceRecord>, Self::Error> {
        let output = self.run(&["list-workspaces", "--all", "--json", "--format", WORKSPACES_FORMAT])?;
        parse_records(&output)
    }

    fn focus_window(&self, window_id: &str) -> Result<(), Self::Error> {
        self.run(&["focus", "--window-id", window_id]).map(|_| ())
    }

    fn set_layout(&self, layout: &str) -> Result<(), Self::Error> {
        self.run(&["layout", layout]).map(|_| ())
    }

    fn config_path(&self) -> Result<String, Self::Error> {
        let path = self.run(&["config", "--config-path"])?.trim().to_string();
        if path.is_empty() {
            return Err(AerospaceError::EmptyConfigPath);
        }
        Ok(path)
    }
}
