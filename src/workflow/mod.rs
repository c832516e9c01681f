pub mod accumulator;
pub mod failure;
pub mod generation_flow;
pub mod session_ctx;

pub use accumulator::Accumulator;
pub use failure::{classify, FailureKind};
pub use generation_flow::GenerationFlow;
pub use session_ctx::SessionContext;
