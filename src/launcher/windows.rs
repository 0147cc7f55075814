//! Window list rows.

use crate::output::{Icon, Item};
use crate::record::{Scope, WindowRecord};

pub const LIST_ERROR_TITLE: &str = "Unable to list windows";
pub const NO_WINDOWS_TITLE: &str = "No windows found";

/// Subtitle for a window in the plain window list.
///
/// Focused scope reads `"<title> - ws <ws> | <monitor>"`; all scope leads
/// with the location, `"ws <ws or ?> | <monitor> - <title>"`.  Empty parts
/// are omitted together with their separator.
pub fn window_subtitle(window: &WindowRecord, scope: Scope) -> String {
    let title = window.window_title.trim();
    let workspace = window.workspace.trim();
    let monitor = window.monitor_name.trim();

    let mut context = Vec::new();
    match (scope, workspace.is_empty()) {
        (_, false) => context.push(format!("ws {}", workspace)),
        (Scope::All, true) => context.push("ws ?".to_string()),
        (Scope::Focused, true) => {}
    }
    if !monitor.is_empty() {
        context.push(monitor.to_string());
    }
    let context = context.join(" | ");

    let parts: Vec<&str> = match scope {
        Scope::All => vec![context.as_str(), title],
        Scope::Focused => vec![title, context.as_str()],
    };
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Title, arg, uid and icon shared by every window row.
pub fn window_item(window: &WindowRecord, subtitle: String) -> Item {
    let title = if window.app_name.is_empty() {
        "Unknown"
    } else {
        window.app_name.as_str()
    };
    Item::new(title)
        .subtitle(subtitle)
        .arg(window.window_id.to_string())
        .uid(format!("window:{}", window.window_id))
        .icon(Icon::file_icon_if_exists(window.app_path.as_deref()))
}

/// Rows for an already ranked window list.
pub fn window_items(windows: &[WindowRecord], scope: Scope) -> Vec<Item> {
    if windows.is_empty() {
        return vec![Item::new(NO_WINDOWS_TITLE).invalid()];
    }
    windows
        .iter()
        .map(|w| window_item(w, window_subtitle(w, scope)))
        .collect()
}
