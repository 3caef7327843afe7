pub mod document;
pub mod rect;
pub mod snapshot;

pub use document::{Document, DocumentView, SelectionStart, TargetHints};
pub use rect::Rect;
pub use snapshot::PageSnapshot;
