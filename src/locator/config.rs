use serde::{Deserialize, Serialize};

use crate::locator::classifier::Strictness;

/// Which attributes the XPath builder may turn into a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeAllowlist {
    /// `data-*` and `href`
    DataAndHref,
    /// `data-*`, `aria-*`, `href` and `name`
    Extended,
}

impl AttributeAllowlist {
    pub fn allows(&self, name: &str) -> bool {
        match self {
            AttributeAllowlist::DataAndHref => name.starts_with("data-") || name == "href",
            AttributeAllowlist::Extended => {
                name.starts_with("data-")
                    || name.starts_with("aria-")
                    || name == "href"
                    || name == "name"
            }
        }
    }
}

/// Tunables of the locator algorithm. Build one from a [`Preset`] unless a
/// caller needs an unusual mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Strictness for ids and classes that feed the CSS and XPath builders.
    pub selector_strictness: Strictness,
    pub attributes: AttributeAllowlist,
    /// When set, descriptor classes and attributes flagged dynamic at this
    /// strictness are dropped.
    pub field_filter: Option<Strictness>,
    /// Record the element's `href` in the descriptor.
    pub include_href: bool,
    /// Only report an id that resolves to exactly one element.
    pub probe_unique_id: bool,
    /// Compute the positional three-level fallback selector.
    pub nested_selector: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

/// Named configurations of the locator algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Narrow attribute allowlist, keeps `href`, no field filtering.
    Basic,
    /// Wider attribute allowlist. Used for single-element locators and for
    /// region collection.
    #[default]
    Extended,
    /// Page Object collection: unique-id probing, strict field filtering and
    /// the nested positional selector.
    PageObject,
}

impl Preset {
    pub fn config(self) -> LocatorConfig {
        match self {
            Preset::Basic => LocatorConfig {
                selector_strictness: Strictness::Lenient,
                attributes: AttributeAllowlist::DataAndHref,
                field_filter: None,
                include_href: true,
                probe_unique_id: false,
                nested_selector: false,
            },
            Preset::Extended => LocatorConfig {
                selector_strictness: Strictness::Lenient,
                attributes: AttributeAllowlist::Extended,
                field_filter: None,
                include_href: false,
                probe_unique_id: false,
                nested_selector: false,
            },
            Preset::PageObject => LocatorConfig {
                selector_strictness: Strictness::Lenient,
                attributes: AttributeAllowlist::Extended,
                field_filter: Some(Strictness::Strict),
                include_href: false,
                probe_unique_id: true,
                nested_selector: true,
            },
        }
    }
}
