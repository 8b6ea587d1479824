//! Mock generation backend for testing.
//!
//! Provides a configurable implementation of the [`TextGenerator`] trait
//! for use in tests without network access or API keys.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use terramod_prompt::{ArtifactKind, InstructionPayload};

use crate::backend::TextGenerator;
use crate::error::{LlmError, LlmResult};

/// Predefined reply for one artifact kind.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Failure(String),
}

/// Mock backend that returns predefined responses per artifact kind and
/// captures every payload it receives for verification.
#[derive(Clone, Default)]
pub struct MockGenerator {
    replies: Arc<RwLock<HashMap<ArtifactKind, MockReply>>>,
    captured: Arc<RwLock<Vec<InstructionPayload>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the text returned for one artifact kind.
    pub fn respond_with(self, kind: ArtifactKind, text: impl Into<String>) -> Self {
        self.replies
            .write()
            .insert(kind, MockReply::Text(text.into()));
        self
    }

    /// Configure a backend failure for one artifact kind.
    pub fn fail_with(self, kind: ArtifactKind, message: impl Into<String>) -> Self {
        self.replies
            .write()
            .insert(kind, MockReply::Failure(message.into()));
        self
    }

    /// Payloads received so far, in dispatch order.
    pub fn captured_payloads(&self) -> Vec<InstructionPayload> {
        self.captured.read().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, payload: &InstructionPayload) -> LlmResult<String> {
        self.captured.write().push(payload.clone());

        match self.replies.read().get(&payload.kind) {
            Some(MockReply::Text(text)) => Ok(text.clone()),
            Some(MockReply::Failure(message)) => Err(LlmError::Backend(message.clone())),
            None => Err(LlmError::Backend(format!(
                "No mock response configured for {}",
                payload.kind
            ))),
        }
    }
}
