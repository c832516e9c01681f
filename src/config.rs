use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{ModelSelector, QuestionKind, RenderConfig};

/// 程序配置文件
///
/// 优先级：命令行 > 环境变量 > 配置文件 > 默认值。
/// API Key 不在这里：它只存在于一次运行的内存中，不写入也不读取配置文件。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 兼容 OpenAI 的 API 地址
    pub api_base_url: String,
    /// 默认模型（"auto" 或具体名称）
    pub model: String,
    /// 默认题目数量
    pub question_count: u32,
    /// 默认题型
    pub question_kind: QuestionKind,
    /// 字号（px）
    pub font_size_px: f32,
    /// 分栏数
    pub column_count: u8,
    /// 导出文件目录
    pub output_dir: PathBuf,
    /// 导出文件名前缀
    pub file_prefix: String,
    /// 无头浏览器可执行文件（为空时自动查找）
    pub browser_executable: Option<PathBuf>,
    /// 实时预览用的浏览器调试端口
    pub preview_debug_port: Option<u16>,
    /// KaTeX 资源地址
    pub katex_base_url: String,
    /// 等待公式排版的超时（毫秒）
    pub typeset_timeout_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model: "auto".to_string(),
            question_count: 20,
            question_kind: QuestionKind::Objective,
            font_size_px: 11.0,
            column_count: 2,
            output_dir: PathBuf::from("."),
            file_prefix: "ExamCraft-Paper".to_string(),
            browser_executable: None,
            preview_debug_port: None,
            katex_base_url: "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist".to_string(),
            typeset_timeout_ms: 5000,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    }

    /// 默认值叠加环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// 用 `EXAMCRAFT_*` 环境变量覆盖当前配置
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = var("EXAMCRAFT_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = var("EXAMCRAFT_MODEL") {
            self.model = v;
        }
        if let Some(v) = var("EXAMCRAFT_QUESTION_COUNT") {
            self.question_count = parse_var("EXAMCRAFT_QUESTION_COUNT", &v, "u32")?;
        }
        if let Some(v) = var("EXAMCRAFT_QUESTION_KIND") {
            self.question_kind = v.parse()?;
        }
        if let Some(v) = var("EXAMCRAFT_FONT_SIZE") {
            self.font_size_px = parse_var("EXAMCRAFT_FONT_SIZE", &v, "f32")?;
        }
        if let Some(v) = var("EXAMCRAFT_COLUMNS") {
            self.column_count = parse_var("EXAMCRAFT_COLUMNS", &v, "u8")?;
        }
        if let Some(v) = var("EXAMCRAFT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = var("EXAMCRAFT_FILE_PREFIX") {
            self.file_prefix = v;
        }
        if let Some(v) = var("EXAMCRAFT_BROWSER") {
            self.browser_executable = Some(PathBuf::from(v));
        }
        if let Some(v) = var("EXAMCRAFT_PREVIEW_PORT") {
            self.preview_debug_port = Some(parse_var("EXAMCRAFT_PREVIEW_PORT", &v, "u16")?);
        }
        if let Some(v) = var("EXAMCRAFT_KATEX_BASE_URL") {
            self.katex_base_url = v;
        }
        if let Some(v) = var("VERBOSE_LOGGING") {
            self.verbose_logging = parse_var("VERBOSE_LOGGING", &v, "bool")?;
        }
        Ok(self)
    }

    pub fn model_selector(&self) -> ModelSelector {
        self.model.parse().unwrap_or_default()
    }

    /// 校验并构造排版配置
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        RenderConfig::new(self.font_size_px, self.column_count)
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value: value.to_string(),
        expected_type: expected_type.to_string(),
    })
}
