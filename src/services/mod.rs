pub mod generation_client;
pub mod prompt_builder;

pub use generation_client::GenerationClient;
pub use prompt_builder::build_instruction;
