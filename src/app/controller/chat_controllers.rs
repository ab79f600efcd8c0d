use std::collections::HashMap;
use std::sync::Arc;

use crate::ai_chat::error::ChatError;
use crate::ai_chat::llm::provider::FragmentStream;
use crate::ai_chat::prompt::AssetContext;
use crate::ai_chat::relay::PersistJob;
use crate::ai_chat::tools::price::CoinPrice;
use crate::app::services::chat_service::ChatReply;
use crate::app::services::service::{AdvisorServices, ModelInfo};

pub struct ChatController {
  services: Arc<AdvisorServices>,
}

impl ChatController {
  pub fn new(services: Arc<AdvisorServices>) -> Self {
    ChatController { services }
  }

  pub fn get_available_models(&self) -> Vec<ModelInfo> {
    return self.services.get_available_models();
  }

  pub async fn chat(&self, message: &str, model_id: Option<&str>) -> Result<ChatReply, ChatError> {
    match self.services.chat(message, model_id).await {
      Ok(reply) => Ok(reply),
      Err(e) => {
        log::error!("Chat request failed: {}", e);
        Err(e)
      }
    }
  }

  pub async fn analyze(
    &self,
    assets: Vec<AssetContext>,
    market_prices: HashMap<String, Option<String>>,
    message: Option<&str>,
    model_id: Option<&str>,
    user_id: String,
  ) -> Result<(FragmentStream, PersistJob), ChatError> {
    match self.services.analyze(assets, market_prices, message, model_id, user_id).await {
      Ok(stream) => Ok(stream),
      Err(e) => {
        log::error!("Portfolio analysis request failed: {}", e);
        Err(e)
      }
    }
  }

  pub async fn coin_prices(&self, coin_ids: &[String]) -> Result<HashMap<String, CoinPrice>, ChatError> {
    match self.services.coin_prices(coin_ids).await {
      Ok(prices) => Ok(prices),
      Err(e) => {
        log::error!("Price oracle lookup failed: {}", e);
        Err(ChatError::Upstream(e.to_string()))
      }
    }
  }
}
