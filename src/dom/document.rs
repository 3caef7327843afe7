use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::dom::rect::Rect;
use crate::error::LocatorError;

// ============================================================================
// Interaction hints: which element the user pointed at
// ============================================================================

/// Start container of the user's current text selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStart {
    /// Document-order element index. When `text_node` is true this is the
    /// parent element of the text node the range starts in.
    pub element: usize,
    #[serde(default)]
    pub text_node: bool,
}

/// Where the user's attention was when the locator request fired.
/// Every index counts elements in document pre-order, `<html>` being 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetHints {
    #[serde(default)]
    pub selection: Option<SelectionStart>,
    #[serde(default)]
    pub focused: Option<usize>,
    #[serde(default)]
    pub hovered: Option<usize>,
}

// ============================================================================
// DocumentView: read-only capability handed to the prober and region query
// ============================================================================

pub trait DocumentView {
    /// Count elements matching a CSS selector.
    fn select_count(&self, selector: &str) -> Result<usize, LocatorError>;

    /// Every element below `<body>` (not `<body>` itself), in document
    /// order, paired with its layout box when one was recorded.
    fn body_boxes(&self) -> Vec<(ElementRef<'_>, Option<Rect>)>;
}

// ============================================================================
// Document
// ============================================================================

/// A parsed page plus the layout and interaction data captured with it.
pub struct Document {
    html: Html,
    layout: HashMap<usize, Rect>,
    hints: TargetHints,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            layout: HashMap::new(),
            hints: TargetHints::default(),
        }
    }

    pub fn with_layout(mut self, layout: HashMap<usize, Rect>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_hints(mut self, hints: TargetHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn hints(&self) -> &TargetHints {
        &self.hints
    }

    /// All elements in document pre-order; position in the vector is the
    /// element index used by layout and hints.
    pub fn elements(&self) -> Vec<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect()
    }

    pub fn element_at(&self, index: usize) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .nth(index)
    }

    /// Document-order index of an element of this document.
    pub fn index_of(&self, element: ElementRef<'_>) -> Option<usize> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .position(|candidate| candidate == element)
    }

    /// First element matching `selector`, `None` on no match or bad syntax.
    pub fn find(&self, selector: &str) -> Option<ElementRef<'_>> {
        let parsed = Selector::parse(selector).ok()?;
        self.html.select(&parsed).next()
    }

    pub fn layout_box(&self, index: usize) -> Option<Rect> {
        self.layout.get(&index).copied()
    }
}

impl DocumentView for Document {
    fn select_count(&self, selector: &str) -> Result<usize, LocatorError> {
        let parsed = Selector::parse(selector).map_err(|e| LocatorError::InvalidSelector {
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(self.html.select(&parsed).count())
    }

    fn body_boxes(&self) -> Vec<(ElementRef<'_>, Option<Rect>)> {
        let mut indexed = self
            .html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .enumerate();

        let Some((body_index, body)) = indexed.find(|(_, el)| el.value().name() == "body") else {
            return Vec::new();
        };

        // A subtree is contiguous in pre-order, so the body's descendants
        // follow it directly.
        body.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .enumerate()
            .map(|(offset, el)| (el, self.layout_box(body_index + 1 + offset)))
            .collect()
    }
}
