use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Model picked when the request omits a model or names one we do not know.
pub const DEFAULT_MODEL_ID: &str = "deepseek/deepseek-r1-0528";

const VESTAI_SYSTEM_PROMPT: &str = "You are VestAI, a helpful financial assistant that can answer general questions about finance, investing, and markets.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
  /// Identifier the client selects by.
  pub model_id: String,
  /// Name sent to OpenRouter in the completion request.
  pub provider_model: String,
  pub system_prompt: String,
  pub streamable: bool,
}

impl ModelConfig {
  fn new(model_id: &str, provider_model: &str, streamable: bool) -> Self {
    ModelConfig {
      model_id: model_id.to_string(),
      provider_model: provider_model.to_string(),
      system_prompt: VESTAI_SYSTEM_PROMPT.to_string(),
      streamable,
    }
  }
}

fn registry_data() -> Vec<ModelConfig> {
  vec![
    ModelConfig::new("deepseek/deepseek-v3", "deepseek/deepseek-chat-v3-0324:free", false),
    ModelConfig::new("mistralai/mistral-small-3.2-24b-instruct", "mistralai/mistral-small-3.2-24b-instruct:free", false),
    ModelConfig::new("google/gemini-2.5-pro-exp-03-25", "google/gemini-2.5-pro-exp-03-25:free", false),
    ModelConfig::new(DEFAULT_MODEL_ID, "deepseek/deepseek-r1-0528:free", true),
  ]
}

static MODEL_REGISTRY: OnceLock<Vec<ModelConfig>> = OnceLock::new();

pub fn get_models() -> &'static [ModelConfig] {
  MODEL_REGISTRY.get_or_init(registry_data).as_slice()
}

/// Unknown ids fall back to the default entry; callers never see a lookup
/// failure from here.
pub fn resolve(model_id: &str) -> &'static ModelConfig {
  let models = get_models();
  models
    .iter()
    .find(|model| model.model_id == model_id)
    .or_else(|| models.iter().find(|model| model.model_id == DEFAULT_MODEL_ID))
    .unwrap_or(&models[0])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_model_resolves_to_its_own_config() {
    let config = resolve("deepseek/deepseek-v3");
    assert_eq!(config.provider_model, "deepseek/deepseek-chat-v3-0324:free");
    assert!(!config.streamable);
  }

  #[test]
  fn unknown_model_resolves_to_the_default_config() {
    assert_eq!(resolve("nonexistent-model"), resolve(DEFAULT_MODEL_ID));
  }

  #[test]
  fn default_model_streams() {
    assert!(resolve(DEFAULT_MODEL_ID).streamable);
  }
}
