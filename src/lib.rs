// HTTP server modules
pub mod handlers;
pub mod models;
pub mod routes;

pub mod config;
pub mod conversation;
pub mod workflow;

// LLM abstraction layer
pub mod llm;
