use tracing::debug;

use crate::dom::document::DocumentView;

/// True iff `selector` matches exactly one element of the document.
/// Selectors the parser rejects count as not unique.
pub fn is_unique(view: &dyn DocumentView, selector: &str) -> bool {
    match view.select_count(selector) {
        Ok(count) => count == 1,
        Err(e) => {
            debug!(selector, error = %e, "selector probe failed");
            false
        }
    }
}
