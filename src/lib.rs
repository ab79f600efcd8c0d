pub mod app;
pub mod ai_chat;
