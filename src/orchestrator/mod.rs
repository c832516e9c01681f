//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 一次运行的"指挥中心"：加载附件、组装请求、驱动生成流程、
//! 维护实时预览、最后按需导出。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一次运行)
//!     ↓
//! workflow::GenerationFlow (一次生成)
//!     ↓
//! services (能力层：提示词 / 生成客户端)
//!     ↓
//! clients + infrastructure (Gemini 服务、DocumentPage)
//! ```
//!
//! 只有编排层持有 Browser 和 DocumentPage。

pub mod app;
pub mod preview;

pub use app::{App, RunOptions, RunOutcome};
pub use preview::PreviewFrame;
