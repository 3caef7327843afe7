pub mod actions;
pub mod notice;

pub use actions::Workflow;
pub use notice::{CollectionNotice, RegionNotice, element_listing, element_summary};
