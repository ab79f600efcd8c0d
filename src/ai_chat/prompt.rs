use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// System prompt for the portfolio-analysis flow. The general chat flow uses
/// the per-model prompt from the registry instead.
pub const ANALYST_SYSTEM_PROMPT: &str = "Kamu adalah seorang analisis/penasihat keuangan cerdas";

pub const DEFAULT_PORTFOLIO_QUERY: &str = "analyze my portfolio";

const PROMPT_SUFFIX: &str = "\
Berikan analisis terstruktur, potensi keuntungan/rugi, saran investasi, dan penilaian risiko berdasarkan data aset di atas.
Jika ada aset yang sebaiknya dibeli atau dijual, sebutkan secara eksplisit beserta tingkat keyakinanmu (tinggi/sedang/rendah).
Jelaskan dalam bahasa yang sederhana dan non-teknis, dan untuk seluruh aset adalah dalam nilai rupiah.
**Jangan gunakan notasi matematis atau LaTeX**, seperti \\text{}, \\boxed{}, simbol $ $, kurung siku [ ], atau simbol matematika lainnya.
Tulis rumus atau perhitungan dengan cara biasa. Contoh: \"Keuntungan = (Harga Jual - Harga Beli) x Jumlah Unit\"
Gunakan format angka standar Indonesia, misalnya: Rp 8.687,33
Berikan hasil dalam format markdown, mudah dibaca oleh pengguna umum (non-teknis).";

/// Read-only projection of a stored asset, exactly the fields the prompt
/// needs. The UI sends these verbatim from its asset table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetContext {
  pub id: String,
  pub name: String,
  pub amount: f64,
  pub buy_price: f64,
}

/// Renders one line per asset in input order. A market-price suffix appears
/// on a line only when `market_prices` carries a non-null entry for that
/// asset's id. Pure function, no I/O.
pub fn build_portfolio_prompt(
  assets: &[AssetContext],
  market_prices: &HashMap<String, Option<String>>,
  user_query: Option<&str>,
) -> String {
  let lines: Vec<String> = assets
    .iter()
    .map(|asset| {
      let market = market_prices.get(&asset.id).and_then(|price| price.as_deref());
      match market {
        Some(price) => format!(
          "- {}, Jumlah: {}, Harga Beli: {}, Harga Pasar Saat Ini: {}",
          asset.name, asset.amount, asset.buy_price, price
        ),
        None => format!("- {}, Jumlah: {}, Harga Beli: {}", asset.name, asset.amount, asset.buy_price),
      }
    })
    .collect();

  let query = match user_query {
    Some(text) if !text.trim().is_empty() => text,
    _ => DEFAULT_PORTFOLIO_QUERY,
  };

  format!(
    "Kamu adalah asisten/penasihat tentang keuangan. Berdasarkan data aset berikut:\n{}\n\nPermintaan pengguna: {}\n\n{}",
    lines.join("\n"),
    query,
    PROMPT_SUFFIX
  )
}
