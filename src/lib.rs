//! # ExamCraft
//!
//! 用 Gemini 从主题文本或附件（图片、PDF）生成可打印试卷的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `clients/` - 生成服务契约 `GenerativeService` 与 Gemini 实现
//! - `infrastructure/` - `DocumentPage`，唯一的 page owner，负责显示文档和执行 JS
//! - `browser/` - 连接调试端口或启动无头浏览器
//!
//! ### ② 业务能力层（Services / Render / Export）
//! - `services/` - 提示词构造、模型选择、流式调用
//! - `render/` - Markdown/LaTeX 到 A4 多栏页面的纯函数
//! - `export/` - PDF 打印、PNG 截图、Markdown 保存
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次生成"：前置检查 → 流式累加 → 失败分类
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 一次运行：请求组装、实时预览、导出
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod export;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GeminiClient, GenerativeService};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::DocumentPage;
pub use models::{Credential, GenerationRequest, GenerationSession, QuestionKind, RenderConfig};
pub use orchestrator::{App, RunOptions, RunOutcome};
pub use render::{render, RenderedDocument};
pub use workflow::{GenerationFlow, SessionContext};
