use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 前置条件不满足（生成请求不会发出）
    #[error("前置条件错误: {0}")]
    Precondition(#[from] PreconditionError),
    /// 生成服务错误
    #[error("生成服务错误: {0}")]
    Service(#[from] ServiceError),
    /// 图片导出错误
    #[error("导出错误: {0}")]
    Capture(#[from] CaptureError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 前置条件错误
///
/// 在任何网络调用之前检测，生成流程不会开始，也不会修改文档内容。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// 未提供 API Key
    #[error("Please enter your Gemini API Key.")]
    MissingCredential,
    /// 既没有主题文本也没有附件
    #[error("Please upload a file or enter a topic prompt.")]
    MissingSource,
}

/// 生成服务错误
///
/// 来自传输层或服务本身（鉴权失败、模型不存在、配额、网络）。
/// 能拿到结构化信息（HTTP 状态码、错误码）时一并保留，分类由调用方负责。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
}

impl ServiceError {
    /// 只有原始消息的服务错误
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// 图片导出（栅格化）错误
#[derive(Debug, Error)]
pub enum CaptureError {
    /// 无法测量文档尺寸
    #[error("无法测量文档尺寸: {0}")]
    Measure(String),
    /// 截图失败
    #[error("截图失败: {0}")]
    Rasterize(String),
    /// 写入图片失败
    #[error("写入图片失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CaptureError {
    /// 展示给用户的提示
    pub fn user_notice(&self) -> &'static str {
        "Failed to generate image. Please try again. If the paper is very long, try printing to PDF instead."
    }
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {reason}")]
    ConnectionFailed { port: u16, reason: String },
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {0}")]
    LaunchFailed(String),
    /// 创建页面失败
    #[error("创建页面失败: {0}")]
    PageCreationFailed(String),
    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    ScriptExecutionFailed(String),
    /// 打印失败
    #[error("打印失败: {0}")]
    PrintFailed(String),
}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserError::ScriptExecutionFailed(err.to_string())
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(err.into())
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 不支持的文件类型（只接受图片和 PDF）
    #[error("不支持的文件类型: {path}")]
    UnsupportedType { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 参数超出范围
    #[error("参数 {name} 超出范围: {value} (允许 {allowed})")]
    OutOfRange {
        name: &'static str,
        value: String,
        allowed: &'static str,
    },
    /// 无法识别的取值
    #[error("无法识别的 {name}: {value}")]
    UnknownValue { name: &'static str, value: String },
}

// ========== 便捷构造函数 ==========

impl FileError {
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
