//! Script-filter result document.
//!
//! Every list entry point prints exactly one [`ResultList`] to stdout:
//!
//! ```json
//! {"items": [{"title": "Safari", "subtitle": "Docs - ws 1", "arg": "42"}]}
//! ```
//!
//! Failures are not exceptional here: they become a single informational
//! item with `"valid": false`.

use serde::Serialize;
use std::path::Path;

/// Icon reference for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub path: String,
}

impl Icon {
    /// Use the Finder icon of the file at `path`.
    pub fn file_icon(path: impl Into<String>) -> Self {
        Self {
            kind: Some("fileicon".into()),
            path: path.into(),
        }
    }

    /// A file icon for `path`, but only if the path exists.
    pub fn file_icon_if_exists(path: Option<&str>) -> Option<Self> {
        let path = path.filter(|p| !p.is_empty())?;
        Path::new(path).exists().then(|| Self::file_icon(path))
    }
}

/// One row in the launcher's result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// `Some(false)` marks an informational, non-actionable row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quicklookurl: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// A non-actionable row, typically an error or an empty-state hint.
    pub fn info(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self::new(title).subtitle(subtitle).invalid()
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn icon(mut self, icon: Option<Icon>) -> Self {
        self.icon = icon;
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    pub fn invalid(self) -> Self {
        self.valid(false)
    }

    pub fn autocomplete(mut self, text: impl Into<String>) -> Self {
        self.autocomplete = Some(text.into());
        self
    }

    pub fn match_text(mut self, text: impl Into<String>) -> Self {
        self.match_text = Some(text.into());
        self
    }

    pub fn quicklook(mut self, url: impl Into<String>) -> Self {
        self.quicklookurl = Some(url.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether the launcher may act on this row.
    pub fn is_actionable(&self) -> bool {
        self.valid != Some(false)
    }
}

/// The full document printed for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultList {
    pub items: Vec<Item>,
}

impl ResultList {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// A document holding a single item.
    pub fn single(item: Item) -> Self {
        Self { items: vec![item] }
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings and options cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| String::from(r#"{"items":[]}"#))
    }
}
