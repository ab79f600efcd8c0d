use super::chat_service::{ChatReply, ChatService};
use crate::ai_chat::error::ChatError;
use crate::ai_chat::llm::provider::FragmentStream;
use crate::ai_chat::prompt::AssetContext;
use crate::ai_chat::relay::PersistJob;
use crate::ai_chat::tools::price::{CoinPrice, PriceOracle};

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Serialize)]
pub struct ModelInfo {
  pub id: String,
  pub model: String,
  pub streamable: bool,
}

pub struct AdvisorServices {
  chat_service: ChatService,
  price_oracle: Arc<dyn PriceOracle>,
}

impl AdvisorServices {
  pub fn new(chat_service: ChatService, price_oracle: Arc<dyn PriceOracle>) -> Self {
    AdvisorServices { chat_service, price_oracle }
  }

  pub fn get_available_models(&self) -> Vec<ModelInfo> {
    self
      .chat_service
      .available_models()
      .iter()
      .map(|model| ModelInfo {
        id: model.model_id.clone(),
        model: model.provider_model.clone(),
        streamable: model.streamable,
      })
      .collect()
  }

  pub async fn chat(&self, message: &str, model_id: Option<&str>) -> Result<ChatReply, ChatError> {
    return self.chat_service.chat(message, model_id).await;
  }

  pub async fn analyze(
    &self,
    assets: Vec<AssetContext>,
    market_prices: HashMap<String, Option<String>>,
    message: Option<&str>,
    model_id: Option<&str>,
    user_id: String,
  ) -> Result<(FragmentStream, PersistJob), ChatError> {
    return self.chat_service.analyze(assets, market_prices, message, model_id, user_id).await;
  }

  pub async fn coin_prices(&self, coin_ids: &[String]) -> anyhow::Result<HashMap<String, CoinPrice>> {
    return self.price_oracle.idr_prices(coin_ids).await;
  }
}
