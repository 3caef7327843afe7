pub mod console;

pub use console::{format_results, format_session, format_session_index};
