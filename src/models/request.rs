//! 生成请求
//!
//! 一次提交的全部用户输入，提交后不可变。

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::QuestionKind;

/// 题目数量的允许范围
pub const MIN_QUESTION_COUNT: u32 = 1;
pub const MAX_QUESTION_COUNT: u32 = 200;

/// 模型选择
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelSelector {
    /// 根据是否有附件自动选择
    #[default]
    Auto,
    /// 显式指定的模型名称，原样使用
    Explicit(String),
}

impl FromStr for ModelSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            Ok(ModelSelector::Auto)
        } else {
            Ok(ModelSelector::Explicit(trimmed.to_string()))
        }
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSelector::Auto => write!(f, "auto"),
            ModelSelector::Explicit(name) => write!(f, "{}", name),
        }
    }
}

/// 二进制附件（图片或 PDF），payload 已经是 base64 编码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAttachment {
    pub mime_type: String,
    pub payload: String,
}

impl BinaryAttachment {
    pub fn new(mime_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    /// 以 data URI 形式表示，供兼容 OpenAI 的接口使用
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}

/// 生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model_selector: ModelSelector,
    pub attachments: Vec<BinaryAttachment>,
    pub topic_text: String,
    pub desired_count: u32,
    pub question_kind: QuestionKind,
}

impl GenerationRequest {
    /// 创建请求并校验题目数量
    pub fn new(
        model_selector: ModelSelector,
        attachments: Vec<BinaryAttachment>,
        topic_text: impl Into<String>,
        desired_count: u32,
        question_kind: QuestionKind,
    ) -> Result<Self, ConfigError> {
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&desired_count) {
            return Err(ConfigError::OutOfRange {
                name: "question count",
                value: desired_count.to_string(),
                allowed: "1-200",
            });
        }

        Ok(Self {
            model_selector,
            attachments,
            topic_text: topic_text.into(),
            desired_count,
            question_kind,
        })
    }

    /// 既没有主题文本也没有附件
    pub fn has_no_source(&self) -> bool {
        self.topic_text.trim().is_empty() && self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_selector_parse() {
        assert_eq!("auto".parse::<ModelSelector>().unwrap(), ModelSelector::Auto);
        assert_eq!("".parse::<ModelSelector>().unwrap(), ModelSelector::Auto);
        assert_eq!(
            "gemini-1.5-pro".parse::<ModelSelector>().unwrap(),
            ModelSelector::Explicit("gemini-1.5-pro".to_string())
        );
    }

    #[test]
    fn test_count_bounds() {
        let make = |count| {
            GenerationRequest::new(ModelSelector::Auto, vec![], "topic", count, QuestionKind::Mixed)
        };
        assert!(make(0).is_err());
        assert!(make(1).is_ok());
        assert!(make(200).is_ok());
        assert!(make(201).is_err());
    }

    #[test]
    fn test_has_no_source() {
        let empty =
            GenerationRequest::new(ModelSelector::Auto, vec![], "  ", 5, QuestionKind::Objective)
                .unwrap();
        assert!(empty.has_no_source());

        let with_file = GenerationRequest::new(
            ModelSelector::Auto,
            vec![BinaryAttachment::new("image/png", "AAAA")],
            "",
            5,
            QuestionKind::Objective,
        )
        .unwrap();
        assert!(!with_file.has_no_source());
    }

    #[test]
    fn test_data_uri() {
        let attachment = BinaryAttachment::new("application/pdf", "JVBERi0=");
        assert_eq!(attachment.to_data_uri(), "data:application/pdf;base64,JVBERi0=");
    }
}
