pub mod backend;
pub mod chat;
pub mod prompts;

pub use backend::{ChatCompletionsBackend, OllamaBackend};
pub use chat::{ChatMessage, MockBackend, Role, TextGeneration};
pub use prompts::{LocatorKinds, PromptSettings};
