pub mod collection;

pub use collection::{CollectionStore, DEFAULT_SESSION, ResultKind};
