pub mod openrouter;
pub mod provider;
pub mod registry;
