pub mod credential;
pub mod loaders;
pub mod model_catalog;
pub mod question_kind;
pub mod render_config;
pub mod request;
pub mod session;

pub use credential::Credential;
pub use loaders::load_attachments;
pub use model_catalog::{resolve_model, FAST_TEXT_MODEL, VISION_MODEL};
pub use question_kind::QuestionKind;
pub use render_config::RenderConfig;
pub use request::{BinaryAttachment, GenerationRequest, ModelSelector};
pub use session::{GenerationSession, SessionStatus};
