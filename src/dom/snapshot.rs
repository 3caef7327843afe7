use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::dom::document::{Document, SelectionStart, TargetHints};
use crate::dom::rect::Rect;
use crate::error::LocatorError;

/// A page as captured from the browser: markup, per-element layout boxes
/// and the interaction hints used to resolve the locator target.
///
/// JSON shape:
///
/// ```json
/// {
///   "url": "https://example.com/login",
///   "title": "Login",
///   "html": "<html>...</html>",
///   "layout": { "12": [40, 120, 300, 32] },
///   "selection": { "element": 12, "textNode": true },
///   "focused": 14,
///   "hovered": 12
/// }
/// ```
///
/// Layout boxes are `[x, y, width, height]` keyed by document-order element
/// index (`<html>` is 0).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub html: String,
    #[serde(default)]
    pub layout: HashMap<usize, [f64; 4]>,
    #[serde(default)]
    pub selection: Option<SelectionStart>,
    #[serde(default)]
    pub focused: Option<usize>,
    #[serde(default)]
    pub hovered: Option<usize>,
}

impl PageSnapshot {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LocatorError> {
        serde_json::from_str(json).map_err(|e| LocatorError::SnapshotParse {
            context: "page snapshot".into(),
            source: e,
        })
    }

    /// Load a snapshot file. `.html`/`.htm` files are taken as bare markup
    /// with no layout or hints; anything else must be snapshot JSON.
    pub fn load(path: &Path) -> Result<Self, LocatorError> {
        let content = std::fs::read_to_string(path).map_err(|e| LocatorError::SnapshotRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_markup = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

        if is_markup {
            Ok(Self::from_html(content))
        } else {
            Self::from_json(&content)
        }
    }

    /// SHA-1 of the markup, hex encoded. Identifies the page in trace logs.
    pub fn digest(&self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.html.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn to_document(&self) -> Document {
        let layout = self
            .layout
            .iter()
            .map(|(index, [x, y, w, h])| (*index, Rect::from_xywh(*x, *y, *w, *h)))
            .collect();

        Document::parse(&self.html)
            .with_layout(layout)
            .with_hints(self.hints())
    }

    pub fn hints(&self) -> TargetHints {
        TargetHints {
            selection: self.selection,
            focused: self.focused,
            hovered: self.hovered,
        }
    }
}
