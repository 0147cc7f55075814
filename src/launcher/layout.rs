//! Focused-window layout menu.

use crate::output::{Icon, Item};
use crate::record::WindowRecord;

pub const FOCUSED_ERROR_TITLE: &str = "Unable to get focused window";
pub const NO_FOCUSED_TITLE: &str = "No focused window";
pub const NO_LAYOUT_CHANGES_TITLE: &str = "No layout changes available";

/// Container kind parsed from a layout name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Floating,
    Tiles,
    Accordion,
}

/// Container kind of a layout name such as `h_tiles`, ignoring its
/// orientation prefix.
///
/// Bare orientations (`horizontal`, `vertical`) and unrecognized names have
/// no kind.
pub fn parse_layout_kind(layout: &str) -> Option<LayoutKind> {
    let name = layout
        .strip_prefix("h_")
        .or_else(|| layout.strip_prefix("v_"))
        .unwrap_or(layout);
    match name {
        "floating" => Some(LayoutKind::Floating),
        "tiles" | "tiling" => Some(LayoutKind::Tiles),
        "accordion" => Some(LayoutKind::Accordion),
        _ => None,
    }
}

/// The four oriented layouts, current kind first.
pub fn ordered_layout_options(current: &str) -> [&'static str; 4] {
    match parse_layout_kind(current) {
        Some(LayoutKind::Accordion) => ["h_accordion", "v_accordion", "h_tiles", "v_tiles"],
        _ => ["h_tiles", "v_tiles", "h_accordion", "v_accordion"],
    }
}

/// Lowercase the query and drop the filler words `set`, `layout` and `to`.
pub fn normalize_query(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| !matches!(*t, "set" | "layout" | "to"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn header_subtitle(window: &WindowRecord) -> String {
    let present = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut details = Vec::new();
    if let Some(l) = present(&window.window_layout) {
        details.push(format!("layout {}", l));
    }
    if let Some(l) = present(&window.window_parent_container_layout) {
        details.push(format!("parent {}", l));
    }
    if let Some(l) = present(&window.workspace_root_container_layout) {
        details.push(format!("root {}", l));
    }
    if window.window_is_fullscreen == Some(true) {
        details.push("fullscreen".to_string());
    }

    let title = window.window_title.trim();
    let details = details.join(" | ");
    match (title.is_empty(), details.is_empty()) {
        (false, false) => format!("{} - {}", title, details),
        (false, true) => title.to_string(),
        (true, _) => details,
    }
}

/// Header row and layout actions for the focused window, if any.
pub fn layout_items(window: Option<&WindowRecord>, query: &str) -> Vec<Item> {
    let Some(window) = window else {
        return vec![Item::new(NO_FOCUSED_TITLE).invalid()];
    };

    let title = if window.app_name.is_empty() {
        "Unknown"
    } else {
        window.app_name.as_str()
    };
    let mut items = vec![Item::new(title)
        .subtitle(header_subtitle(window))
        .invalid()
        .icon(Icon::file_icon_if_exists(window.app_path.as_deref()))];

    let current = window.window_layout.as_deref().map(str::trim).unwrap_or("");
    let filter = normalize_query(query);
    let mut actions = Vec::new();

    for layout in ordered_layout_options(current) {
        if layout == current || (!filter.is_empty() && !layout.contains(filter.as_str())) {
            continue;
        }
        let subtitle = if current.is_empty() {
            String::new()
        } else {
            format!("Current: {}", current)
        };
        actions.push(layout_action(layout, subtitle));
    }

    let toggle = if current == "floating" {
        layout_action("tiling", "Switch from floating".to_string())
    } else {
        layout_action("floating", "Switch from tiling".to_string())
    };
    if filter.is_empty() || toggle.title.to_lowercase().contains(filter.as_str()) {
        actions.push(toggle);
    }

    if actions.is_empty() {
        items.push(Item::new(NO_LAYOUT_CHANGES_TITLE).invalid());
    } else {
        items.extend(actions);
    }
    items
}

fn layout_action(layout: &str, subtitle: String) -> Item {
    Item::new(format!("Set layout: {}", layout))
        .subtitle(subtitle)
        .arg(layout)
        .autocomplete(layout)
}
