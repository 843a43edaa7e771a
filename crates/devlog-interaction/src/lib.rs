//! Text-generation collaborators for devlog.

pub mod gemini_api_agent;
pub mod retrying_generator;

pub use gemini_api_agent::GeminiApiAgent;
pub use retrying_generator::RetryingGenerator;
