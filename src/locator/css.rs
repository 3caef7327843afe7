use scraper::ElementRef;

use crate::locator::classifier::is_dynamic;
use crate::locator::config::LocatorConfig;
use crate::locator::node::{class_tokens, parent_element, same_tag_ordinal, stable_id, tag_name};

/// Tags that get an `:nth-of-type` qualifier; rows, cells and list items are
/// usually repeated without distinguishing classes.
const POSITIONAL_TAGS: [&str; 3] = ["tr", "td", "li"];

/// Derive a child-combinator CSS selector for `element` by walking up its
/// ancestors.
///
/// A stable id ends the walk with `tag#id`. Otherwise each level contributes
/// `tag`, its stable classes and, for [`POSITIONAL_TAGS`], its position among
/// same-tag siblings. The result always matches the element but is not
/// guaranteed to be unique. `None` yields an empty string.
pub fn build_css_selector(element: Option<ElementRef<'_>>, config: &LocatorConfig) -> String {
    let Some(element) = element else {
        return String::new();
    };
    let tag = tag_name(element);

    if let Some(id) = stable_id(element, config.selector_strictness) {
        return format!("{}#{}", tag, id);
    }

    let classes: Vec<&str> = class_tokens(element)
        .filter(|class| !is_dynamic(class, config.selector_strictness))
        .collect();
    let class_part = if classes.is_empty() {
        String::new()
    } else {
        format!(".{}", classes.join("."))
    };

    let parent = parent_element(element);
    let nth_part = match parent {
        Some(_) if POSITIONAL_TAGS.contains(&tag) => {
            format!(":nth-of-type({})", same_tag_ordinal(element))
        }
        _ => String::new(),
    };

    let parent_selector = build_css_selector(parent, config);
    if parent_selector.is_empty() {
        format!("{}{}{}", tag, class_part, nth_part)
    } else {
        format!("{} > {}{}{}", parent_selector, tag, class_part, nth_part)
    }
}
