use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// Final cleaned analysis text plus the asset snapshot it was built from.
/// Created once per completed stream, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
  pub id: String,
  pub user_id: String,
  pub content: String,
  pub assets: String,
  pub created_at: DateTime<Utc>,
}

/// Record store seam. The real database lives outside this service; anything
/// with a create operation can back it.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
  async fn create(&self, user_id: &str, content: &str, assets_snapshot: &str) -> Result<AnalysisRecord>;
}

#[derive(Default)]
pub struct MemoryAnalysisStore {
  records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryAnalysisStore {
  pub fn new() -> Self {
    MemoryAnalysisStore::default()
  }

  pub fn records(&self) -> Vec<AnalysisRecord> {
    self.records.lock().map(|records| records.clone()).unwrap_or_default()
  }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
  async fn create(&self, user_id: &str, content: &str, assets_snapshot: &str) -> Result<AnalysisRecord> {
    let record = AnalysisRecord {
      id: Uuid::new_v4().to_string(),
      user_id: user_id.to_string(),
      content: content.to_string(),
      assets: assets_snapshot.to_string(),
      created_at: Utc::now(),
    };

    let mut records = self.records.lock().map_err(|_| anyhow!("analysis store lock poisoned"))?;
    records.push(record.clone());
    Ok(record)
  }
}
