//! 命令行参数
//!
//! 命令行的值覆盖配置文件和环境变量。

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::models::{Credential, QuestionKind};
use crate::orchestrator::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "examcraft")]
#[command(author, version, about = "Generate print-ready exam papers with Gemini", long_about = None)]
pub struct Cli {
    /// 配置文件（TOML）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gemini API Key，只在本次运行的内存中使用
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// 模型："auto" 或具体模型名
    #[arg(short, long)]
    pub model: Option<String>,

    /// 主题文本
    #[arg(short, long, default_value = "")]
    pub topic: String,

    /// 附件（图片或 PDF），可多次指定
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// 题目数量
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=200))]
    pub count: Option<u32>,

    /// 题型：objective / subjective / mixed
    #[arg(short = 'k', long)]
    pub kind: Option<QuestionKind>,

    /// 字号（px，8-16，步长 0.5）
    #[arg(long)]
    pub font_size: Option<f32>,

    /// 分栏数（1-3）
    #[arg(long)]
    pub columns: Option<u8>,

    /// 导出 PDF
    #[arg(long)]
    pub pdf: bool,

    /// 导出 PNG
    #[arg(long)]
    pub png: bool,

    /// 保存 Markdown 原文
    #[arg(long)]
    pub markdown: bool,

    /// 导出目录
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 实时预览：连接此调试端口上的浏览器
    #[arg(long)]
    pub preview_port: Option<u16>,

    /// 列出可选模型后退出
    #[arg(long)]
    pub list_models: bool,

    /// 不把生成的文本写到 stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// 详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 把命令行的值叠加到配置上
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(count) = self.count {
            config.question_count = count;
        }
        if let Some(kind) = self.kind {
            config.question_kind = kind;
        }
        if let Some(size) = self.font_size {
            config.font_size_px = size;
        }
        if let Some(columns) = self.columns {
            config.column_count = columns;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(port) = self.preview_port {
            config.preview_debug_port = Some(port);
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }

    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            topic: self.topic.clone(),
            attachments: self.files.clone(),
            export_pdf: self.pdf,
            export_png: self.png,
            export_markdown: self.markdown,
            echo: !self.quiet,
        }
    }
}
