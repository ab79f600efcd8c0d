use std::collections::HashMap;
use std::sync::Arc;

use crate::ai_chat::error::ChatError;
use crate::ai_chat::llm::provider::{ChatMessage, CompletionGateway, FragmentStream};
use crate::ai_chat::llm::registry::{self, ModelConfig};
use crate::ai_chat::prompt::{self, AssetContext};
use crate::ai_chat::relay::PersistJob;
use crate::ai_chat::store::AnalysisStore;

/// What the chat endpoint hands back: a full body for non-streaming models,
/// an incremental fragment stream otherwise.
pub enum ChatReply {
  Full(String),
  Stream(FragmentStream),
}

pub struct ChatService {
  gateway: Arc<dyn CompletionGateway>,
  store: Arc<dyn AnalysisStore>,
}

impl ChatService {
  pub fn new(gateway: Arc<dyn CompletionGateway>, store: Arc<dyn AnalysisStore>) -> Self {
    ChatService { gateway, store }
  }

  pub fn available_models(&self) -> &'static [ModelConfig] {
    registry::get_models()
  }

  pub async fn chat(&self, message: &str, model_id: Option<&str>) -> Result<ChatReply, ChatError> {
    if message.trim().is_empty() {
      return Err(ChatError::Validation("No message provided.".to_string()));
    }

    let config = registry::resolve(model_id.unwrap_or(registry::DEFAULT_MODEL_ID));
    let messages = vec![ChatMessage::system(&config.system_prompt), ChatMessage::user(message)];

    if config.streamable {
      let fragments = self.gateway.stream(messages, &config.provider_model).await?;
      Ok(ChatReply::Stream(fragments))
    } else {
      let content = self.gateway.complete(messages, &config.provider_model).await?;
      Ok(ChatReply::Full(content))
    }
  }

  /// Portfolio analysis always streams; the resolved model only picks the
  /// provider-side name. Returns the fragment stream together with the
  /// persistence job the relay runs once accumulation is done.
  pub async fn analyze(
    &self,
    assets: Vec<AssetContext>,
    market_prices: HashMap<String, Option<String>>,
    message: Option<&str>,
    model_id: Option<&str>,
    user_id: String,
  ) -> Result<(FragmentStream, PersistJob), ChatError> {
    if assets.is_empty() {
      return Err(ChatError::Validation("Data aset kosong.".to_string()));
    }

    let config = registry::resolve(model_id.unwrap_or(registry::DEFAULT_MODEL_ID));
    let user_prompt = prompt::build_portfolio_prompt(&assets, &market_prices, message);
    let messages = vec![
      ChatMessage::system(prompt::ANALYST_SYSTEM_PROMPT),
      ChatMessage::user(&user_prompt),
    ];

    let fragments = self.gateway.stream(messages, &config.provider_model).await?;
    let job = PersistJob {
      store: self.store.clone(),
      assets,
      user_id,
    };

    Ok((fragments, job))
  }
}
