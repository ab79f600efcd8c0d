use actix_web::{web, App};
use std::sync::Arc;

use crate::ai_chat::llm::openrouter::OpenRouterProvider;
use crate::ai_chat::llm::provider::CompletionGateway;
use crate::ai_chat::store::{AnalysisStore, MemoryAnalysisStore};
use crate::ai_chat::tools::price::{CoinGeckoOracle, PriceOracle};
use crate::app::config::Config;
use crate::app::routes::routes::Routes;

use super::controller::chat_controllers::ChatController;
use super::services::chat_service::ChatService;
use super::services::service::AdvisorServices;

#[derive(Clone)]
pub struct AppState {
  pub chat_controller: Arc<ChatController>,
}

impl AppState {
  pub fn new(app_config: &Config) -> Self {
    let gateway: Arc<dyn CompletionGateway> = Arc::new(OpenRouterProvider::new(app_config));
    let store: Arc<dyn AnalysisStore> = Arc::new(MemoryAnalysisStore::new());
    let oracle: Arc<dyn PriceOracle> = Arc::new(CoinGeckoOracle::new());
    Self::with_parts(gateway, store, oracle)
  }

  /// Tests inject a stub gateway, store and oracle through here.
  pub fn with_parts(
    gateway: Arc<dyn CompletionGateway>,
    store: Arc<dyn AnalysisStore>,
    oracle: Arc<dyn PriceOracle>,
  ) -> Self {
    let chat_service: ChatService = ChatService::new(gateway, store);
    let advisor_services: Arc<AdvisorServices> = Arc::new(AdvisorServices::new(chat_service, oracle));
    let chat_controller: Arc<ChatController> = Arc::new(ChatController::new(advisor_services));
    AppState { chat_controller }
  }
}

#[allow(unused)]
pub struct CreateApp {
  app_state: AppState,
  app_settings: Config,
}

impl CreateApp {
  pub fn new(app_settings: Config) -> Self {
    let app_state: AppState = AppState::new(&app_settings);
    CreateApp { app_state, app_settings }
  }

  pub fn build_app(&self,) -> App<impl actix_web::dev::ServiceFactory<actix_web::dev::ServiceRequest,Config = (),Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,Error = actix_web::Error,InitError = (),>,> {
    App::new()
    .app_data(web::Data::new(self.app_state.chat_controller.clone()))
    .configure(Routes::configure)
  }
}
