use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::ai_chat::error::ChatError;

/// Placeholder returned when the provider answers with no content at all.
pub const EMPTY_COMPLETION_FALLBACK: &str = "No response.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: &str) -> Self {
    ChatMessage { role: "system".to_string(), content: content.to_string() }
  }

  pub fn user(content: &str) -> Self {
    ChatMessage { role: "user".to_string(), content: content.to_string() }
  }
}

/// Ordered, finite sequence of text fragments from one upstream connection.
/// Not restartable; an error item means nothing further will arrive.
pub type FragmentStream = BoxStream<'static, Result<String, ChatError>>;

/// Outbound call to the hosted LLM provider. One attempt per request, no
/// retries; every failure mode collapses into `ChatError::Upstream`.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
  /// Blocking completion. Returns the full message text, or the literal
  /// placeholder when the provider sends empty content.
  async fn complete(&self, messages: Vec<ChatMessage>, provider_model: &str) -> Result<String, ChatError>;

  /// Incremental completion over a fresh upstream connection.
  async fn stream(&self, messages: Vec<ChatMessage>, provider_model: &str) -> Result<FragmentStream, ChatError>;
}
