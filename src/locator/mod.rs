//! Locator generation: dynamic-token filtering, CSS and XPath builders,
//! element descriptors and region collection.

pub mod classifier;
pub mod config;
pub mod css;
pub mod descriptor;
mod node;
pub mod prober;
pub mod region;
pub mod xpath;

pub use classifier::{Strictness, is_dynamic};
pub use config::{AttributeAllowlist, LocatorConfig, Preset};
pub use css::build_css_selector;
pub use descriptor::{ElementDescriptor, describe, describe_element, nested_div_selector, resolve_target};
pub use prober::is_unique;
pub use region::{collect_region, elements_in};
pub use xpath::{build_text_xpath, build_xpath};
