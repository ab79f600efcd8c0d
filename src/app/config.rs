use std::env;

use log;

#[derive(Clone)]
pub struct Config {
  pub open_router_api_key: String,
  pub open_router_base_url: String,
}

impl Config {
  pub fn load() -> Self {
    match dotenv::dotenv() {
      Ok(_) => log::info!("Loaded .env file"),
      Err(_) => log::error!("No .env file found"),
    }

    let open_router_api_key: String = env::var("OPEN_ROUTER_API").unwrap_or_else(|_| {
      log::error!("Warning: OPEN_ROUTER_API not set, provider calls will fail upstream");
      String::new()
    });

    let open_router_base_url: String = env::var("OPEN_ROUTER_BASE_URL")
      .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

    return Config {
      open_router_api_key,
      open_router_base_url,
    };
  }
}
