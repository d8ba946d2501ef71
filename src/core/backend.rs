/// External narrative/image generator seam.
///
/// The engine never talks to a provider directly; hosts hand it anything
/// implementing `NarrativeBackend`. Any error from either call selects the
/// fallback narration path — there is no retry or partial-result handling
/// at this layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("generation request failed: {0}")]
    Request(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in the conversation sent to the text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The two-function interface to the hosted text/image service.
///
/// `generate_image` returns an opaque reference — a data URI or URL —
/// that the engine passes through untouched.
pub trait NarrativeBackend {
    fn generate_text(&self, messages: &[ChatMessage]) -> Result<String, BackendError>;
    fn generate_image(&self, prompt: &str) -> Result<String, BackendError>;
}
