pub mod gemini_client;
pub mod generative_service;

pub use gemini_client::GeminiClient;
pub use generative_service::{
    ContentPart, FragmentStream, GenerativeService, ServiceRequest, GENERATION_TEMPERATURE,
};
