use scraper::ElementRef;
use tracing::info;

use crate::dom::document::DocumentView;
use crate::dom::rect::Rect;
use crate::locator::config::Preset;
use crate::locator::descriptor::{ElementDescriptor, describe_element};

/// Elements under `<body>` whose layout box intersects `rect`, in document
/// order. Elements without a recorded box are treated as not rendered.
///
/// Single linear pass; this runs once per drag gesture.
pub fn elements_in<'a>(view: &'a dyn DocumentView, rect: &Rect) -> Vec<ElementRef<'a>> {
    view.body_boxes()
        .into_iter()
        .filter(|(_, layout)| layout.is_some_and(|b| b.intersects(rect)))
        .map(|(element, _)| element)
        .collect()
}

/// Describe every element in the region with the extended preset.
pub fn collect_region(view: &dyn DocumentView, rect: &Rect) -> Vec<ElementDescriptor> {
    let config = Preset::Extended.config();
    let descriptors: Vec<ElementDescriptor> = elements_in(view, rect)
        .into_iter()
        .map(|element| describe_element(view, element, &config))
        .collect();

    info!(
        count = descriptors.len(),
        left = rect.left,
        top = rect.top,
        right = rect.right,
        bottom = rect.bottom,
        "collected region"
    );
    descriptors
}
