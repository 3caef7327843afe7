//! Locator and Page Object generation for web UI tests.
//!
//! Given a captured page, the [`locator`] module derives CSS selectors,
//! XPath expressions and text-based XPath for an element while filtering out
//! identifiers that look machine-generated. [`workflow`] ties that to a
//! persistent collection of elements and to an LLM that turns descriptors
//! into framework-specific code.

pub mod cli;
pub mod dom;
pub mod error;
pub mod llm;
pub mod locator;
pub mod report;
pub mod store;
pub mod trace;
pub mod workflow;

use crate::dom::snapshot::PageSnapshot;
use crate::locator::{ElementDescriptor, Preset, describe};

/// Describe the target element of a snapshot with the given preset.
/// `None` when the snapshot carries no usable selection, focus or hover.
pub fn locate(snapshot: &PageSnapshot, preset: Preset) -> Option<ElementDescriptor> {
    let document = snapshot.to_document();
    describe(&document, &preset.config())
}
