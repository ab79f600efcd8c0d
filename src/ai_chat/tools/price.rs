use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPrice {
  pub idr: f64,
}

/// Market-price lookup seam. Unknown ids are simply absent from the
/// returned map. CoinGecko backs it in production; tests stub it.
#[async_trait]
pub trait PriceOracle: Send + Sync {
  async fn idr_prices(&self, coin_ids: &[String]) -> Result<HashMap<String, CoinPrice>>;
}

/// CoinGecko simple-price lookup in rupiah.
pub struct CoinGeckoOracle {
  base_url: String,
  client: Client,
}

impl CoinGeckoOracle {
  pub fn new() -> Self {
    CoinGeckoOracle {
      base_url: "https://api.coingecko.com/api/v3".to_string(),
      client: Client::new(),
    }
  }
}

impl Default for CoinGeckoOracle {
  fn default() -> Self {
    CoinGeckoOracle::new()
  }
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
  async fn idr_prices(&self, coin_ids: &[String]) -> Result<HashMap<String, CoinPrice>> {
    let ids = coin_ids.join(",");
    let url = format!("{}/simple/price?ids={}&vs_currencies=idr", self.base_url, ids);
    log::debug!("Price oracle URL: {}", url);

    let response = self.client.get(&url).send().await?;
    if !response.status().is_success() {
      log::error!("Price oracle returned {}", response.status());
      return Err(anyhow!("price oracle returned status {}", response.status()));
    }

    let prices: HashMap<String, CoinPrice> = response.json().await?;
    Ok(prices)
  }
}
