pub mod error;
pub mod llm;
pub mod prompt;
pub mod relay;
pub mod store;
pub mod tools;
