use std::fmt;

use crate::locator::descriptor::ElementDescriptor;

/// One line of the collected-element listing:
/// `"{n}. {tag} (ID: {id}, Text: {text})"`.
pub fn element_summary(position: usize, element: &ElementDescriptor) -> String {
    format!(
        "{}. {} (ID: {}, Text: {})",
        position,
        element.tag_name,
        element.id.as_deref().unwrap_or("N/A"),
        if element.text.is_empty() { "N/A" } else { &element.text }
    )
}

/// Numbered listing of every element in a session.
pub fn element_listing(elements: &[ElementDescriptor]) -> String {
    elements
        .iter()
        .enumerate()
        .map(|(i, el)| element_summary(i + 1, el))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What the user is told after an element is added to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionNotice {
    pub added: ElementDescriptor,
    pub listing: String,
    pub total: usize,
}

impl fmt::Display for CollectionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New element added:\n{} ({})\n\nAll elements:\n{}",
            self.added.tag_name,
            self.added.id.as_deref().unwrap_or("No ID"),
            self.listing
        )
    }
}

/// What the user is told after a region drag completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionNotice {
    pub collected: usize,
    pub total: usize,
}

impl fmt::Display for RegionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} elements collected in region and saved.", self.collected)
    }
}
