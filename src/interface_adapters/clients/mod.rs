// Outbound HTTP clients.

pub mod llm;

pub use llm::LlmClient;
