use indexmap::IndexMap;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dom::document::{Document, DocumentView};
use crate::locator::classifier::is_dynamic;
use crate::locator::config::LocatorConfig;
use crate::locator::css::build_css_selector;
use crate::locator::node::{class_tokens, parent_element, same_tag_ordinal, stable_id, tag_name};
use crate::locator::prober::is_unique;
use crate::locator::xpath::{build_text_xpath, build_xpath};

/// Levels covered by the nested positional selector, element included.
pub const NESTED_LEVELS: usize = 3;

/// Elements whose text never renders.
const HIDDEN_TEXT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Everything known about one element: raw metadata plus derived locators.
///
/// Serialized with the field names the generation prompts and the
/// collected-element store expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    #[serde(rename = "tagName")]
    pub tag_name: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(rename = "xPath")]
    pub xpath: String,
    #[serde(rename = "cssSelector")]
    pub css_selector: String,
    #[serde(rename = "byTextXPath")]
    pub text_xpath: Option<String>,
    #[serde(
        rename = "nestedDivSelector",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nested_selector: Option<String>,
}

/// Pick the element the user meant: the parent of a text selection's start,
/// then the focused element, then the hovered one.
pub fn resolve_target(document: &Document) -> Option<ElementRef<'_>> {
    let hints = document.hints();

    let from_selection = hints
        .selection
        .filter(|start| start.text_node)
        .and_then(|start| document.element_at(start.element));

    from_selection
        .or_else(|| hints.focused.and_then(|index| document.element_at(index)))
        .or_else(|| hints.hovered.and_then(|index| document.element_at(index)))
}

/// Resolve the target element and describe it. `None` means no target could
/// be resolved; callers report that to the user.
pub fn describe(document: &Document, config: &LocatorConfig) -> Option<ElementDescriptor> {
    let Some(element) = resolve_target(document) else {
        warn!("no target element: nothing selected, focused or hovered");
        return None;
    };
    Some(describe_element(document, element, config))
}

pub fn describe_element(
    view: &dyn DocumentView,
    element: ElementRef<'_>,
    config: &LocatorConfig,
) -> ElementDescriptor {
    let tag = tag_name(element);

    let id = stable_id(element, config.selector_strictness)
        .filter(|id| !config.probe_unique_id || is_unique(view, &format!("{}#{}", tag, id)))
        .map(str::to_string);

    let keep = |token: &str| match config.field_filter {
        Some(strictness) => !is_dynamic(token, strictness),
        None => true,
    };

    let classes = class_tokens(element)
        .filter(|class| keep(*class))
        .map(str::to_string)
        .collect();

    let attributes = element
        .value()
        .attrs()
        .filter(|(name, value)| keep(*name) && keep(*value))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let href = if config.include_href {
        element.value().attr("href").map(str::to_string)
    } else {
        None
    };

    let text = rendered_text(element);
    let text_xpath = build_text_xpath(tag, &text);

    let nested_selector = config.nested_selector.then(|| nested_div_selector(element));

    let descriptor = ElementDescriptor {
        tag_name: tag.to_string(),
        id,
        classes,
        text,
        attributes,
        href,
        xpath: build_xpath(Some(element), config),
        css_selector: build_css_selector(Some(element), config),
        text_xpath,
        nested_selector,
    };

    debug!(
        tag = %descriptor.tag_name,
        css = %descriptor.css_selector,
        xpath = %descriptor.xpath,
        "described element"
    );
    descriptor
}

/// Positional selector over the element and its closest ancestors, element
/// first, e.g. `li:nth-of-type(3) > ul:nth-of-type(1) > div:nth-of-type(2)`.
pub fn nested_div_selector(element: ElementRef<'_>) -> String {
    let mut levels = Vec::with_capacity(NESTED_LEVELS);
    let mut current = Some(element);

    while let Some(el) = current {
        if levels.len() == NESTED_LEVELS {
            break;
        }
        levels.push(format!("{}:nth-of-type({})", tag_name(el), same_tag_ordinal(el)));
        current = parent_element(el);
    }

    levels.join(" > ")
}

/// Visible text of the element: descendant text with whitespace collapsed.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !HIDDEN_TEXT_TAGS.contains(&tag_name(child_element)) {
                push_text(child_element, out);
            }
        }
    }
}
