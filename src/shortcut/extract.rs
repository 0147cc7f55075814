//! Flattening `mode.<name>.binding` tables into [`ShortcutRecord`]s.

use serde::Serialize;

/// One keybinding from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutRecord {
    pub mode: String,
    /// Hyphen-delimited token, e.g. `alt-shift-j`.
    pub shortcut: String,
    /// Human-readable rendering of the bound command.
    pub description: String,
}

/// Walk every mode's binding table in document order.
///
/// A `mode` key that is not a table yields nothing.  Modes that are not
/// tables, or whose `binding` is missing or not a table, are skipped.
pub fn extract_shortcuts(document: &toml::Table) -> Vec<ShortcutRecord> {
    let Some(modes) = document.get("mode").and_then(toml::Value::as_table) else {
        return Vec::new();
    };

    let mut shortcuts = Vec::new();
    for (mode_name, mode) in modes {
        let Some(bindings) = mode
            .as_table()
            .and_then(|m| m.get("binding"))
            .and_then(toml::Value::as_table)
        else {
            continue;
        };
        for (shortcut, command) in bindings {
            shortcuts.push(ShortcutRecord {
                mode: mode_name.clone(),
                shortcut: shortcut.clone(),
                description: normalize_description(command),
            });
        }
    }
    shortcuts
}

/// Render a bound command as text.
///
/// The value is serialized as ASCII-only JSON, every `"` is removed, and a
/// `-` between two word characters becomes a space.
pub fn normalize_description(value: &toml::Value) -> String {
    let json = json_text(value);
    let text: Vec<char> = json.chars().filter(|&c| c != '"').collect();

    let mut out = String::with_capacity(text.len());
    for (i, &c) in text.iter().enumerate() {
        let between_words = c == '-'
            && i > 0
            && is_word(text[i - 1])
            && text.get(i + 1).copied().is_some_and(is_word);
        out.push(if between_words { ' ' } else { c });
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// JSON rendering with `", "` / `": "` separators and every non-ASCII
/// character written as `\uXXXX`.
fn json_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => ascii_escape(&serde_json::Value::from(s.as_str()).to_string()),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => serde_json::Value::from(*f).to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => ascii_escape(&serde_json::Value::from(d.to_string()).to_string()),
        toml::Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(json_text).collect();
            format!("[{}]", parts.join(", "))
        }
        toml::Value::Table(table) => {
            let parts: Vec<String> = table
                .iter()
                .map(|(k, v)| {
                    let key = ascii_escape(&serde_json::Value::from(k.as_str()).to_string());
                    format!("{}: {}", key, json_text(v))
                })
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn ascii_escape(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}
