use actix_web::web::Bytes;
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::result::Result::Ok;

use crate::ai_chat::error::ChatError;
use crate::ai_chat::llm::provider::{ChatMessage, CompletionGateway, FragmentStream, EMPTY_COMPLETION_FALLBACK};
use crate::app::config::Config;

#[derive(Serialize, Debug)]
struct OpenRouterChatRequest {
  model: String,
  stream: bool,
  messages: Vec<ChatMessage>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
  content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
  message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
  choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct StreamDelta {
  content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
  delta: StreamDelta,
}

#[derive(Deserialize, Debug)]
struct StreamChunk {
  choices: Vec<StreamChoice>,
}

enum SseLine {
  Fragment(String),
  Done,
  Skip,
}

/// One SSE line: `data: {json}` payloads carry a delta, `data: [DONE]` ends
/// the stream, everything else (comments, keep-alives, blank lines) is noise.
fn parse_sse_line(line: &str) -> Result<SseLine, ChatError> {
  let line = line.trim_end_matches('\r');
  let data = match line.strip_prefix("data:") {
    Some(rest) => rest.trim_start_matches(' '),
    None => return Ok(SseLine::Skip),
  };
  if data.is_empty() {
    return Ok(SseLine::Skip);
  }
  if data == "[DONE]" {
    return Ok(SseLine::Done);
  }

  let parsed: StreamChunk = serde_json::from_str(data)
    .map_err(|e| ChatError::Upstream(format!("stream decode error: {}", e)))?;

  match parsed.choices.into_iter().next().and_then(|choice| choice.delta.content) {
    Some(content) if !content.is_empty() => Ok(SseLine::Fragment(content)),
    _ => Ok(SseLine::Skip),
  }
}

fn decode_sse<S, E>(body: S) -> FragmentStream
where
  S: Stream<Item = Result<Bytes, E>> + Send + 'static,
  E: std::fmt::Display + Send + 'static,
{
  let fragments = stream! {
    futures::pin_mut!(body);
    let mut buffer = String::new();

    while let Some(next) = body.next().await {
      let chunk = match next {
        Ok(bytes) => bytes,
        Err(e) => {
          yield Err(ChatError::Upstream(format!("stream chunk error: {}", e)));
          return;
        }
      };
      let text = match std::str::from_utf8(&chunk) {
        Ok(text) => text,
        Err(e) => {
          yield Err(ChatError::Upstream(format!("stream utf8 error: {}", e)));
          return;
        }
      };
      buffer.push_str(text);

      while let Some(pos) = buffer.find('\n') {
        let line = buffer[..pos].to_string();
        buffer.drain(..=pos);

        match parse_sse_line(&line) {
          Ok(SseLine::Fragment(content)) => yield Ok(content),
          Ok(SseLine::Done) => return,
          Ok(SseLine::Skip) => {}
          Err(e) => {
            yield Err(e);
            return;
          }
        }
      }
    }

    // Upstream may close without a trailing newline; the leftover line still counts.
    if !buffer.is_empty() {
      match parse_sse_line(&buffer) {
        Ok(SseLine::Fragment(content)) => yield Ok(content),
        Ok(_) => {}
        Err(e) => yield Err(e),
      }
    }
  };

  fragments.boxed()
}

fn extract_content(completion: CompletionResponse) -> String {
  let content = completion
    .choices
    .into_iter()
    .next()
    .and_then(|choice| choice.message.content)
    .unwrap_or_default();
  if content.is_empty() {
    EMPTY_COMPLETION_FALLBACK.to_string()
  } else {
    content
  }
}

pub struct OpenRouterProvider {
  chat_url: String,
  api_key: String,
  client: Client,
}

impl OpenRouterProvider {
  pub fn new(config: &Config) -> Self {
    let chat_url = format!("{}/chat/completions", config.open_router_base_url.trim_end_matches('/'));
    OpenRouterProvider {
      chat_url,
      api_key: config.open_router_api_key.clone(),
      client: Client::new(),
    }
  }

  async fn send(&self, messages: Vec<ChatMessage>, provider_model: &str, streaming: bool) -> Result<reqwest::Response, ChatError> {
    let request = OpenRouterChatRequest {
      model: provider_model.to_string(),
      stream: streaming,
      messages,
    };

    let response = self
      .client
      .post(&self.chat_url)
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await
      .map_err(|e| ChatError::Upstream(format!("request failed: {}", e)))?;

    if !response.status().is_success() {
      log::error!("OpenRouter returned {} for model {}", response.status(), provider_model);
      return Err(ChatError::Upstream(format!("provider returned status {}", response.status())));
    }

    Ok(response)
  }
}

#[async_trait]
impl CompletionGateway for OpenRouterProvider {
  async fn complete(&self, messages: Vec<ChatMessage>, provider_model: &str) -> Result<String, ChatError> {
    let response = self.send(messages, provider_model, false).await?;
    let completion: CompletionResponse = response
      .json()
      .await
      .map_err(|e| ChatError::Upstream(format!("malformed provider response: {}", e)))?;
    Ok(extract_content(completion))
  }

  async fn stream(&self, messages: Vec<ChatMessage>, provider_model: &str) -> Result<FragmentStream, ChatError> {
    let response = self.send(messages, provider_model, true).await?;
    Ok(decode_sse(response.bytes_stream()))
  }
}
