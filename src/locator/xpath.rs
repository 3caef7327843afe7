use scraper::ElementRef;

use crate::locator::config::LocatorConfig;
use crate::locator::node::{parent_element, same_tag_ordinal, stable_id, tag_name};

/// Derive an XPath expression for `element`.
///
/// Priority: stable id (`//*[@id="..."]`), then allowlisted attributes
/// joined with `and`, then a positional path built from the parent's XPath.
///
/// The attribute branch is not anchored to any ancestor: `//tag[@attr="v"]`
/// matches anywhere in the document and may select more than one element
/// when several share the same attribute values. Callers wanting a unique
/// locator should check the result against the page.
pub fn build_xpath(element: Option<ElementRef<'_>>, config: &LocatorConfig) -> String {
    let Some(element) = element else {
        return String::new();
    };
    let tag = tag_name(element);

    if let Some(id) = stable_id(element, config.selector_strictness) {
        return format!("//*[@id=\"{}\"]", id);
    }

    let terms: Vec<String> = element
        .value()
        .attrs()
        .filter(|(name, _)| config.attributes.allows(name))
        .map(|(name, value)| format!("@{}=\"{}\"", name, value))
        .collect();

    if !terms.is_empty() {
        return format!("//{}[{}]", tag, terms.join(" and "));
    }

    let step = format!("{}[{}]", tag, same_tag_ordinal(element));
    let parent_path = build_xpath(parent_element(element), config);
    if parent_path.is_empty() {
        format!("//{}", step)
    } else {
        format!("{}/{}", parent_path, step)
    }
}

/// Text at or beyond this many characters gets no text XPath.
pub const MAX_TEXT_XPATH_CHARS: usize = 100;

/// Text-matching XPath, only for short non-empty text.
pub fn build_text_xpath(tag: &str, text: &str) -> Option<String> {
    if text.is_empty() || text.chars().count() >= MAX_TEXT_XPATH_CHARS {
        return None;
    }
    Some(format!("//{}[contains(normalize-space(.), \"{}\")]", tag, text))
}
