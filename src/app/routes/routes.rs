use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::ai_chat::error::ChatError;
use crate::ai_chat::prompt::AssetContext;
use crate::ai_chat::relay::relay;
use crate::app::controller::chat_controllers::ChatController;
use crate::app::services::chat_service::ChatReply;

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatRequest {
  message: Option<String>,
  model: Option<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalyzeRequest {
  assets: Option<Vec<AssetContext>>,
  market_prices: Option<HashMap<String, Option<String>>>,
  message: Option<String>,
  model: Option<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PriceRequest {
  coin_ids: Vec<String>,
}

pub struct Routes;

impl Routes {
  pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(Self::health)));
    cfg.service(web::resource("/ai/models").route(web::get().to(Self::get_models)));
    cfg.service(web::resource("/ai/chat").route(web::post().to(Self::chat)));
    cfg.service(web::resource("/ai/analyze").route(web::post().to(Self::analyze)));
    cfg.service(web::resource("/price").route(web::post().to(Self::coin_prices)));
  }

  async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
      "status": "ok",
      "Info": "Welcome to VestAI portfolio tracker.",
      "code": 200,
    }))
  }

  async fn get_models(controller: web::Data<Arc<ChatController>>) -> impl Responder {
    HttpResponse::Ok().json(controller.get_available_models())
  }

  async fn chat(
    controller: web::Data<Arc<ChatController>>,
    request: web::Json<ChatRequest>,
  ) -> Result<HttpResponse, ChatError> {
    let message = request.message.as_deref().unwrap_or("");

    match controller.chat(message, request.model.as_deref()).await? {
      ChatReply::Full(content) => Ok(HttpResponse::Ok().content_type("text/plain").body(content)),
      ChatReply::Stream(fragments) => Ok(
        HttpResponse::Ok()
          .content_type("text/event-stream")
          .streaming(relay(fragments, None)),
      ),
    }
  }

  async fn analyze(
    controller: web::Data<Arc<ChatController>>,
    request: web::Json<AnalyzeRequest>,
    http_request: HttpRequest,
  ) -> Result<HttpResponse, ChatError> {
    let user_id = Self::caller_id(&http_request);
    let request = request.into_inner();

    let (fragments, job) = controller
      .analyze(
        request.assets.unwrap_or_default(),
        request.market_prices.unwrap_or_default(),
        request.message.as_deref(),
        request.model.as_deref(),
        user_id,
      )
      .await?;

    Ok(
      HttpResponse::Ok()
        .content_type("text/event-stream")
        .streaming(relay(fragments, Some(job))),
    )
  }

  async fn coin_prices(
    controller: web::Data<Arc<ChatController>>,
    request: web::Json<PriceRequest>,
  ) -> Result<HttpResponse, ChatError> {
    if request.coin_ids.is_empty() {
      return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": "Coin ID kosong" })));
    }
    let prices = controller.coin_prices(&request.coin_ids).await?;
    Ok(HttpResponse::Ok().json(prices))
  }

  // Stand-in for the identity provider: requests may carry a caller id, and
  // analyses persisted without one keep an empty user association.
  fn caller_id(request: &HttpRequest) -> String {
    request
      .headers()
      .get("X-User-Id")
      .and_then(|value| value.to_str().ok())
      .unwrap_or("")
      .to_string()
  }
}
