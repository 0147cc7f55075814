//! Workspace overview rows.
//!
//! The query is `[ws |workspace ]<workspace> [filter…]`.  When `<workspace>`
//! names an existing workspace exactly, that workspace is opened: a header
//! row followed by its windows.  Otherwise every workspace is listed, ranked
//! by the partial id, and each row autocompletes to `"<id> "`.

use super::windows::window_item;
use crate::fuzzy;
use crate::output::Item;
use crate::record::{WindowRecord, WorkspaceRecord};
use std::collections::BTreeSet;

pub const WORKSPACE_LIST_ERROR_TITLE: &str = "Unable to list workspaces";
pub const NO_WORKSPACES_TITLE: &str = "No workspaces found";

const PREVIEW_APPS: usize = 3;

/// A workspace query split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkspaceQuery {
    /// The query after prefix stripping; empty means "show the hint".
    pub cleaned: String,
    pub workspace: String,
    pub filter: String,
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| s[prefix.len()..].trim())
}

/// Strip a leading `ws ` and then `workspace ` (any case) and split off the
/// first word.
pub fn parse_query(query: &str) -> WorkspaceQuery {
    let mut cleaned = query.trim();
    if let Some(rest) = strip_prefix_ci(cleaned, "ws ") {
        cleaned = rest;
    }
    if let Some(rest) = strip_prefix_ci(cleaned, "workspace ") {
        cleaned = rest;
    }

    let (workspace, filter) = match cleaned.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (cleaned, ""),
    };
    WorkspaceQuery {
        cleaned: cleaned.to_string(),
        workspace: workspace.to_string(),
        filter: filter.to_string(),
    }
}

/// First three distinct non-empty app names, then `+k` for the rest.
pub fn apps_preview(windows: &[&WindowRecord]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for w in windows {
        let name = w.app_name.trim();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    let mut preview = names
        .iter()
        .take(PREVIEW_APPS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > PREVIEW_APPS {
        preview.push_str(&format!(" +{}", names.len() - PREVIEW_APPS));
    }
    preview
}

fn workspace_title(ws: &WorkspaceRecord) -> String {
    if ws.is_focused {
        format!("Workspace {} [focused]", ws.workspace)
    } else {
        format!("Workspace {}", ws.workspace)
    }
}

/// `"<n> windows | focused | <monitor> | apps …"`, leaving out what does
/// not apply.  The monitor is only named when there are several.
fn workspace_subtitle(ws: &WorkspaceRecord, windows: &[&WindowRecord], show_monitor: bool) -> String {
    let mut parts = vec![format!("{} windows", windows.len())];
    if ws.is_focused {
        parts.push("focused".to_string());
    }
    let monitor = ws.monitor_name.trim();
    if show_monitor && !monitor.is_empty() {
        parts.push(monitor.to_string());
    }
    let preview = apps_preview(windows);
    if !preview.is_empty() {
        parts.push(format!("apps {}", preview));
    }
    parts.join(" | ")
}

fn has_several_monitors(workspaces: &[WorkspaceRecord]) -> bool {
    let monitors: BTreeSet<&str> = workspaces
        .iter()
        .map(|ws| ws.monitor_name.trim())
        .filter(|m| !m.is_empty())
        .collect();
    monitors.len() > 1
}

fn windows_on<'a>(windows: &'a [WindowRecord], workspace: &str) -> Vec<&'a WindowRecord> {
    windows.iter().filter(|w| w.workspace == workspace).collect()
}

/// Rows for the workspace overview.
pub fn overview_items(
    query: &str,
    windows: Vec<WindowRecord>,
    workspaces: Vec<WorkspaceRecord>,
) -> Vec<Item> {
    let query = parse_query(query);
    let show_monitor = has_several_monitors(&workspaces);

    if !query.workspace.is_empty() {
        if let Some(ws) = workspaces.iter().find(|ws| ws.workspace == query.workspace) {
            return workspace_detail(ws, &query.filter, windows, show_monitor);
        }
    }

    let mut items = Vec::new();
    if query.cleaned.is_empty() {
        items.push(Item::info(
            "Type a workspace id to list its windows",
            "Example: 2 or ws 2 chrome",
        ));
    }

    let ranked = if query.workspace.is_empty() {
        workspaces
    } else {
        fuzzy::rank(&query.workspace, workspaces)
    };
    for ws in &ranked {
        let members = windows_on(&windows, &ws.workspace);
        items.push(
            Item::new(workspace_title(ws))
                .subtitle(workspace_subtitle(ws, &members, show_monitor))
                .invalid()
                .autocomplete(format!("{} ", ws.workspace)),
        );
    }

    if items.is_empty() {
        items.push(Item::new(NO_WORKSPACES_TITLE).invalid());
    }
    items
}

/// Header plus the (filtered) windows of one workspace.
fn workspace_detail(
    ws: &WorkspaceRecord,
    filter: &str,
    windows: Vec<WindowRecord>,
    show_monitor: bool,
) -> Vec<Item> {
    let members: Vec<WindowRecord> = windows
        .into_iter()
        .filter(|w| w.workspace == ws.workspace)
        .collect();
    let members = fuzzy::rank(filter, members);
    let refs: Vec<&WindowRecord> = members.iter().collect();

    let mut items = vec![Item::new(workspace_title(ws))
        .subtitle(workspace_subtitle(ws, &refs, show_monitor))
        .invalid()];
    items.extend(
        members
            .iter()
            .map(|w| window_item(w, w.window_title.trim().to_string())),
    );
    if members.is_empty() {
        items.push(Item::new(format!("No windows in workspace {}", ws.workspace)).invalid());
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(mut ws: WorkspaceRecord) -> WorkspaceRecord {
        ws.is_focused = true;
        ws
    }

    fn fixture() -> (Vec<WindowRecord>, Vec<WorkspaceRecord>) {
        let windows = vec![
            WindowRecord::new("Safari", "Docs", 1).on_workspace("1"),
            WindowRecord::new("Ghostty", "zsh", 2).on_workspace("1"),
            WindowRecord::new("Mail", "Inbox", 3).on_workspace("2"),
        ];
        let workspaces = vec![
            focused(WorkspaceRecord::new("1", "Built-in")),
            WorkspaceRecord::new("2", "Built-in"),
            WorkspaceRecord::new("12", "Built-in"),
        ];
        (windows, workspaces)
    }

    #[test]
    fn prefixes_are_stripped() {
        assert_eq!(parse_query("ws 2 chrome").workspace, "2");
        assert_eq!(parse_query("WS 2 chrome").filter, "chrome");
        assert_eq!(parse_query("workspace 3").workspace, "3");
        assert_eq!(parse_query("ws workspace 4").workspace, "4");
        assert_eq!(parse_query("  ").cleaned, "");
        assert_eq!(parse_query("wsx").workspace, "wsx");
    }

    #[test]
    fn filter_keeps_inner_words() {
        let q = parse_query("2   google  chrome");
        assert_eq!(q.workspace, "2");
        assert_eq!(q.filter, "google  chrome");
    }

    #[test]
    fn preview_truncates_after_three_apps() {
        let ws: Vec<WindowRecord> = ["A", "B", "A", "C", "D", "E", ""]
            .iter()
            .enumerate()
            .map(|(i, n)| WindowRecord::new(*n, "", i as u64))
            .collect();
        let refs: Vec<&WindowRecord> = ws.iter().collect();
        assert_eq!(apps_preview(&refs), "A, B, C +2");
        assert_eq!(apps_preview(&refs[..2]), "A, B");
    }

    #[test]
    fn empty_query_shows_hint_then_all_workspaces() {
        let (windows, workspaces) = fixture();
        let items = overview_items("", windows, workspaces);
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title, "Type a workspace id to list its windows");
        assert_eq!(items[1].title, "Workspace 1 [focused]");
        assert_eq!(items[1].subtitle, "2 windows | focused | apps Safari, Ghostty");
        assert_eq!(items[1].autocomplete.as_deref(), Some("1 "));
        assert_eq!(items[3].subtitle, "0 windows");
    }

    #[test]
    fn exact_id_opens_workspace() {
        let (windows, workspaces) = fixture();
        let items = overview_items("ws 1", windows, workspaces);
        assert_eq!(items.len(), 3);
        assert!(!items[0].is_actionable());
        assert_eq!(items[1].title, "Safari");
        assert_eq!(items[1].subtitle, "Docs");
        assert_eq!(items[1].arg.as_deref(), Some("1"));
    }

    #[test]
    fn filter_ranks_windows_in_workspace() {
        let (windows, workspaces) = fixture();
        let items = overview_items("1 gho", windows, workspaces);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "Ghostty");
        assert!(items[0].subtitle.starts_with("1 windows"));
    }

    #[test]
    fn empty_workspace_gets_placeholder_row() {
        let (windows, workspaces) = fixture();
        let items = overview_items("12", windows, workspaces);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "No windows in workspace 12");
    }

    #[test]
    fn partial_id_ranks_workspaces() {
        let (windows, mut workspaces) = fixture();
        workspaces.retain(|ws| ws.workspace != "1");
        let items = overview_items("1", windows, workspaces);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Workspace 12");
    }

    #[test]
    fn monitor_name_does_not_select_workspaces() {
        let workspaces = vec![
            WorkspaceRecord::new("1", "Built-in Retina Display"),
            WorkspaceRecord::new("2", "Built-in Retina Display"),
            WorkspaceRecord::new("B", "DELL U2720Q"),
        ];
        let items = overview_items("bu", Vec::new(), workspaces);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, NO_WORKSPACES_TITLE);
    }

    #[test]
    fn no_match_reports_no_workspaces() {
        let (windows, workspaces) = fixture();
        let items = overview_items("zzz", windows, workspaces);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, NO_WORKSPACES_TITLE);
    }

    #[test]
    fn monitor_named_only_with_several_monitors() {
        let (windows, mut workspaces) = fixture();
        workspaces[2].monitor_name = "LG".into();
        let items = overview_items("2", windows, workspaces);
        assert_eq!(items[0].subtitle, "1 windows | Built-in | apps Mail");
    }
}
