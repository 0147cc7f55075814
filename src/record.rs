//! Records and types shared by every component.
//!
//! This module defines the vocabulary that the rest of the crate speaks:
//! [`Scope`] selects which windows a query covers, and [`WindowRecord`] /
//! [`WorkspaceRecord`] mirror the JSON objects AeroSpace prints for
//! `list-windows --json` and `list-workspaces --json`.
//!
//! Field names on the wire are AeroSpace's own kebab-case format variables
//! (`app-name`, `window-id`, …), so a record serialized into the snapshot
//! cache reads back identical to the one that was fetched.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which windows a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Windows on the currently focused workspace.
    #[default]
    Focused,
    /// Every window on every workspace and monitor.
    All,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Focused => write!(f, "focused"),
            Scope::All => write!(f, "all"),
        }
    }
}

impl Scope {
    /// Parse a scope name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Scope> {
        match s.trim().to_lowercase().as_str() {
            "focused" => Some(Scope::Focused),
            "all" => Some(Scope::All),
            _ => None,
        }
    }

    /// Pick the first non-empty candidate and parse it.
    ///
    /// Candidates are ordered by precedence.  The first non-empty one wins
    /// even when it does not name a valid scope, in which case the result
    /// is [`Scope::Focused`].
    pub fn resolve<'a, I>(candidates: I) -> Scope
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        candidates
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .and_then(Scope::parse)
            .unwrap_or_default()
    }
}

//  Loosely typed wire values

/// A boolean that AeroSpace may print either as a JSON bool or as the
/// string `"true"` / `"false"`.
struct LooseBool(bool);

impl<'de> Deserialize<'de> for LooseBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = LooseBool;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "boolean or \"true\"/\"false\" string")
            }
            fn visit_bool<E>(self, b: bool) -> Result<LooseBool, E> {
                Ok(LooseBool(b))
            }
            fn visit_str<E>(self, s: &str) -> Result<LooseBool, E>
            where
                E: DeError,
            {
                Ok(LooseBool(s.trim().eq_ignore_ascii_case("true")))
            }
        }
        deserializer.deserialize_any(V)
    }
}

fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    LooseBool::deserialize(deserializer).map(|b| b.0)
}

fn optional_loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseBool>::deserialize(deserializer).map(|b| b.map(|b| b.0))
}

/// Window ids arrive as JSON numbers; numeric strings are accepted too.
fn window_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Visitor;
    struct V;
    impl<'de> Visitor<'de> for V {
        type Value = u64;
        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "non-negative integer or numeric string")
        }
        fn visit_u64<E>(self, n: u64) -> Result<u64, E> {
            Ok(n)
        }
        fn visit_i64<E>(self, n: i64) -> Result<u64, E>
        where
            E: DeError,
        {
            u64::try_from(n).map_err(|_| DeError::custom(format!("negative window id: {}", n)))
        }
        fn visit_str<E>(self, s: &str) -> Result<u64, E>
        where
            E: DeError,
        {
            s.trim()
                .parse()
                .map_err(|_| DeError::custom(format!("invalid window id: {:?}", s)))
        }
    }
    deserializer.deserialize_any(V)
}

//  Records

/// One live window as reported by `aerospace list-windows`.
///
/// The layout fields are only populated by the focused-window query; the
/// bulk listing leaves them `None`.  `app_path` is filled in by the
/// [`SnapshotFetcher`](crate::snapshot::SnapshotFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WindowRecord {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub window_title: String,
    #[serde(deserialize_with = "window_id")]
    pub window_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_pid: Option<u32>,
    #[serde(default)]
    pub workspace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_bundle_id: Option<String>,
    #[serde(default)]
    pub monitor_name: String,
    /// Filesystem path of the application bundle, when it could be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_parent_container_layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_root_container_layout: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_loose_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub window_is_fullscreen: Option<bool>,
}

impl WindowRecord {
    /// A bare record with only the fields every listing carries.
    pub fn new(app_name: impl Into<String>, window_title: impl Into<String>, window_id: u64) -> Self {
        Self {
            app_name: app_name.into(),
            window_title: window_title.into(),
            window_id,
            app_pid: None,
            workspace: String::new(),
            app_bundle_id: None,
            monitor_name: String::new(),
            app_path: None,
            window_layout: None,
            window_parent_container_layout: None,
            workspace_root_container_layout: None,
            window_is_fullscreen: None,
        }
    }

    /// Builder-style setter for the owning workspace.
    pub fn on_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = workspace.into();
        self
    }

    /// Builder-style setter for the monitor name.
    pub fn on_monitor(mut self, monitor: impl Into<String>) -> Self {
        self.monitor_name = monitor.into();
        self
    }

    /// Builder-style setter for the bundle identifier.
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.app_bundle_id = Some(bundle_id.into());
        self
    }
}

/// One workspace slot as reported by `aerospace list-workspaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    #[serde(default)]
    pub workspace: String,
    #[serde(rename = "monitor-name", default)]
    pub monitor_name: String,
    #[serde(rename = "workspace-is-focused", default, deserialize_with = "loose_bool")]
    pub is_focused: bool,
    #[serde(rename = "workspace-is-visible", default, deserialize_with = "loose_bool")]
    pub is_visible: bool,
    #[serde(
        rename = "workspace-root-container-layout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub root_layout: Option<String>,
}

impl WorkspaceRecord {
    pub fn new(workspace: impl Into<String>, monitor_name: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            monitor_name: monitor_name.into(),
            is_focused: false,
            is_visible: false,
            root_layout: None,
        }
    }
}
