//! Shortcut list and config entry rows.

use crate::config::{ConfigError, LoadedConfig, INSTALL_GUIDE_URL};
use crate::output::Item;
use crate::shortcut::extract::{extract_shortcuts, ShortcutRecord};
use log::warn;
use std::path::{Path, PathBuf};

pub const CONFIG_ERROR_TITLE: &str = "AeroSpace config error";
pub const CONFIG_UNAVAILABLE_TITLE: &str = "AeroSpace config unavailable";
pub const PREVIEW_FILE_NAME: &str = "aerospace_config_preview.txt";

/// `"<description> <token> <mode>"`, the text a query is matched against.
pub fn match_text(shortcut: &ShortcutRecord) -> String {
    format!("{} {} {}", shortcut.description, shortcut.shortcut, shortcut.mode)
}

/// One row per binding whose match text contains `query` (ignoring case).
pub fn shortcut_items(config: Result<&LoadedConfig, &ConfigError>, query: &str) -> Vec<Item> {
    let config = match config {
        Ok(config) => config,
        Err(e) => return vec![Item::info(CONFIG_ERROR_TITLE, e.to_string())],
    };

    let query = query.to_lowercase();
    extract_shortcuts(&config.document)
        .into_iter()
        .filter_map(|s| {
            let text = match_text(&s);
            if !query.is_empty() && !text.to_lowercase().contains(&query) {
                return None;
            }
            Some(
                Item::new(s.description.as_str())
                    .subtitle(format!("{} - mode: {}", s.shortcut, s.mode))
                    .arg(s.shortcut.as_str())
                    .uid(format!("shortcut:{}:{}", s.mode, s.shortcut))
                    .match_text(text),
            )
        })
        .collect()
}

/// Copy the config to `<dir>/aerospace_config_preview.txt` for Quick Look.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn write_preview(source: &Path, dir: &Path) -> std::io::Result<PathBuf> {
    let bytes = std::fs::read(source)?;
    std::fs::create_dir_all(dir)?;
    let preview = dir.join(PREVIEW_FILE_NAME);
    std::fs::write(&preview, String::from_utf8_lossy(&bytes).as_bytes())?;
    Ok(preview)
}

/// The single row that opens the config file.
///
/// On failure the row points at the AeroSpace install guide instead.  A
/// preview that cannot be written falls back to the config file itself.
pub fn config_item(config: Result<&LoadedConfig, &ConfigError>, scratch_dir: &Path) -> Item {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            return Item::new(CONFIG_UNAVAILABLE_TITLE)
                .subtitle(e.to_string())
                .arg(INSTALL_GUIDE_URL)
                .valid(true)
        }
    };

    let path = config.path.to_string_lossy().into_owned();
    let preview = match write_preview(&config.path, scratch_dir) {
        Ok(preview) => preview.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("failed to write config preview to {}: {}", scratch_dir.display(), e);
            path.clone()
        }
    };
    Item::new("AeroSpace Config")
        .subtitle(path.as_str())
        .arg(path.as_str())
        .quicklook(preview)
        .kind("file")
}
