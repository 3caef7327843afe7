use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Remote text generation: messages in, generated text out.
pub trait TextGeneration {
    fn complete(&self, messages: &[ChatMessage], max_tokens: Option<u32>) -> Result<String, LlmError>;
}

// ============================================================================
// Mock backend (for testing without a live service)
// ============================================================================

/// Returns a canned reply (or fails) and records every request it receives.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    reply: Option<String>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl MockBackend {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: Arc::default(),
        }
    }

    /// A backend whose every call fails with [`LlmError::EmptyResponse`].
    pub fn failing() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded requests; stays valid after the backend
    /// is boxed and moved.
    pub fn calls(&self) -> Arc<Mutex<Vec<Vec<ChatMessage>>>> {
        Arc::clone(&self.calls)
    }
}

impl TextGeneration for MockBackend {
    fn complete(&self, messages: &[ChatMessage], _max_tokens: Option<u32>) -> Result<String, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        self.reply.clone().ok_or(LlmError::EmptyResponse)
    }
}
