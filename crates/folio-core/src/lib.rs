pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod llm;
pub mod model;
pub mod prompt;
