use actix_web::web::Bytes;
use async_stream::stream;
use futures::{Stream, StreamExt};
use std::sync::Arc;

use crate::ai_chat::llm::provider::{FragmentStream, EMPTY_COMPLETION_FALLBACK};
use crate::ai_chat::prompt::AssetContext;
use crate::ai_chat::store::AnalysisStore;

const REASONING_OPEN: &str = "<think>";
const REASONING_CLOSE: &str = "</think>";

/// Write scheduled for after the forwarding loop finishes. Its outcome is
/// logged and swallowed; the client has the full body by then.
pub struct PersistJob {
  pub store: Arc<dyn AnalysisStore>,
  pub assets: Vec<AssetContext>,
  pub user_id: String,
}

/// Forwards each upstream fragment to the client in arrival order while
/// accumulating the full text. On a mid-stream upstream error the bytes
/// already sent stand and nothing further follows. Persistence runs on the
/// same flow, strictly after accumulation completes.
pub fn relay(
  mut fragments: FragmentStream,
  persist: Option<PersistJob>,
) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
  stream! {
    let mut full_text = String::new();
    let mut failed = false;

    while let Some(next) = fragments.next().await {
      match next {
        Ok(fragment) => {
          full_text.push_str(&fragment);
          yield Ok(Bytes::from(fragment));
        }
        Err(e) => {
          log::error!("upstream stream failed mid-response: {}", e);
          failed = true;
          break;
        }
      }
    }

    if full_text.is_empty() {
      yield Ok(Bytes::from_static(EMPTY_COMPLETION_FALLBACK.as_bytes()));
    }

    if failed {
      return;
    }

    if let Some(job) = persist {
      let cleaned = strip_reasoning(&full_text);
      let snapshot = serde_json::to_string(&job.assets).unwrap_or_else(|_| "[]".to_string());
      if let Err(e) = job.store.create(&job.user_id, &cleaned, &snapshot).await {
        log::error!("failed to persist analysis: {}", e);
      }
    }
  }
}

/// Removes every `<think>…</think>` span from the accumulated text. Scans
/// marker pairs explicitly rather than pattern-matching, so multiple spans
/// are handled one at a time. An opening marker with no matching close
/// leaves the remainder untouched. Applied only to the persisted copy,
/// never to the bytes forwarded to the client.
pub fn strip_reasoning(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut rest = text;

  while let Some(open) = rest.find(REASONING_OPEN) {
    match rest[open + REASONING_OPEN.len()..].find(REASONING_CLOSE) {
      Some(close) => {
        out.push_str(&rest[..open]);
        rest = &rest[open + REASONING_OPEN.len() + close + REASONING_CLOSE.len()..];
      }
      None => break,
    }
  }

  out.push_str(rest);
  out
}
