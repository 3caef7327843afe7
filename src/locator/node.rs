use scraper::ElementRef;

use crate::locator::classifier::{Strictness, is_dynamic};

pub fn tag_name<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().name()
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// 1-based position among element siblings sharing the same tag.
pub fn same_tag_ordinal(element: ElementRef<'_>) -> usize {
    let tag = tag_name(element);
    1 + element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| tag_name(*sibling) == tag)
        .count()
}

/// Class tokens in source order, duplicates kept.
pub fn class_tokens<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .value()
        .attr("class")
        .unwrap_or("")
        .split_whitespace()
}

/// The element's id when it is present and does not look generated.
pub fn stable_id(element: ElementRef<'_>, strictness: Strictness) -> Option<&str> {
    element
        .value()
        .id()
        .filter(|id| !id.is_empty() && !is_dynamic(id, strictness))
}
